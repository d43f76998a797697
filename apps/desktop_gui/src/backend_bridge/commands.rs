//! Backend commands queued from UI to backend worker.

use shared::domain::SelectedFile;

pub enum BackendCommand {
    SubmitBatch { files: Vec<SelectedFile> },
    DownloadResult { filename: String },
    DownloadAll,
    ClearResults,
}
