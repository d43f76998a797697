//! Backend worker: owns the service client and executes queued commands.

use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{anyhow, Context as _};
use crossbeam_channel::{Receiver, Sender};
use upload_client::ServiceClient;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub struct WorkerConfig {
    pub server_url: Url,
    pub downloads_dir: PathBuf,
}

/// Picks the directory processed files are saved to. Resolved once at
/// startup so a misconfigured path fails before the window opens.
pub fn resolve_downloads_dir(override_dir: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow!("unable to resolve a downloads directory"))
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, config: WorkerConfig) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = ServiceClient::new(config.server_url);
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::SubmitBatch { files } => {
                        tracing::info!("backend: submit_batch of {} files", files.len());
                        match client.submit_batch(&files).await {
                            Ok(outcomes) => {
                                let _ = ui_tx.try_send(UiEvent::BatchFinished { outcomes });
                            }
                            Err(err) => {
                                tracing::error!("backend: submit_batch failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Submit,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                    BackendCommand::DownloadResult { filename } => {
                        tracing::info!("backend: download_result for {filename}");
                        match client.download_result(&filename).await {
                            Ok(bytes) => {
                                match save_download(&config.downloads_dir, &filename, &bytes) {
                                    Ok(path) => {
                                        let _ = ui_tx.try_send(UiEvent::DownloadFinished {
                                            filename,
                                            saved_to: path,
                                        });
                                    }
                                    Err(err) => {
                                        tracing::error!("backend: saving {filename} failed: {err:#}");
                                        let _ =
                                            ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                                UiErrorContext::Download,
                                                format!("{err:#}"),
                                            )));
                                    }
                                }
                            }
                            Err(err) => {
                                tracing::error!("backend: download_result failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Download,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                    BackendCommand::DownloadAll => {
                        tracing::info!("backend: download_all");
                        match client.download_all().await {
                            Ok(archive) => {
                                match save_download(
                                    &config.downloads_dir,
                                    &archive.filename,
                                    &archive.bytes,
                                ) {
                                    Ok(path) => {
                                        let _ = ui_tx.try_send(UiEvent::DownloadFinished {
                                            filename: archive.filename,
                                            saved_to: path,
                                        });
                                    }
                                    Err(err) => {
                                        tracing::error!("backend: saving archive failed: {err:#}");
                                        let _ =
                                            ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                                UiErrorContext::Download,
                                                format!("{err:#}"),
                                            )));
                                    }
                                }
                            }
                            Err(err) => {
                                tracing::error!("backend: download_all failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Download,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                    BackendCommand::ClearResults => {
                        tracing::info!("backend: clear_results");
                        match client.clear_results().await {
                            Ok(()) => {
                                let _ = ui_tx.try_send(UiEvent::ResultsCleared);
                            }
                            Err(err) => {
                                tracing::error!("backend: clear_results failed: {err}");
                                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                                    UiErrorContext::Clear,
                                    err.to_string(),
                                )));
                            }
                        }
                    }
                }
            }
        });
    });
}

fn save_download(dir: &Path, filename: &str, bytes: &[u8]) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("could not prepare downloads directory '{}'", dir.display()))?;

    // Served names come from the service; keep only the final path component.
    let safe_name = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download.bin");
    let path = dir.join(safe_name);
    std::fs::write(&path, bytes)
        .with_context(|| format!("could not write '{}'", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::{resolve_downloads_dir, save_download};
    use std::path::{Path, PathBuf};

    #[test]
    fn saves_downloads_under_the_configured_directory() {
        let dir = std::env::temp_dir()
            .join("barcode_gui_tests")
            .join("downloads");
        let _ = std::fs::remove_dir_all(&dir);

        let saved = save_download(&dir, "CODE-1.jpg", b"jpeg-bytes").expect("save");

        assert_eq!(saved, dir.join("CODE-1.jpg"));
        assert_eq!(std::fs::read(&saved).expect("read back"), b"jpeg-bytes");
    }

    #[test]
    fn strips_directory_components_from_served_filenames() {
        let dir = std::env::temp_dir().join("barcode_gui_tests").join("escape");
        let _ = std::fs::remove_dir_all(&dir);

        let saved = save_download(&dir, "../../evil.jpg", b"x").expect("save");

        assert_eq!(saved, dir.join("evil.jpg"));
    }

    #[test]
    fn resolve_prefers_the_override_directory() {
        assert_eq!(
            resolve_downloads_dir(Some(Path::new("/tmp/override"))).expect("resolve"),
            PathBuf::from("/tmp/override")
        );
    }
}
