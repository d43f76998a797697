use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A file attached to the upload form, captured at selection time.
///
/// The size is whatever the filesystem reported when the file was picked or
/// dropped; the service re-checks on its side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub filename: String,
    pub size_bytes: u64,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            filename,
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Success,
    Error,
}

/// Per-file record returned by the service after a batch upload: either the
/// decoded barcode plus the renamed file, or the service's failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub original_filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_text: Option<String>,
    pub status: ProcessStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProcessOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == ProcessStatus::Success
    }
}

/// Success/failure tallies for a processed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub success_count: usize,
    pub error_count: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ProcessOutcome]) -> Self {
        let success_count = outcomes.iter().filter(|o| o.succeeded()).count();
        Self {
            success_count,
            error_count: outcomes.len() - success_count,
        }
    }
}
