//! HTTP client for the barcode processing service. One multipart upload per
//! batch, plus the download and cleanup routes the results panel drives.

use std::path::PathBuf;

use reqwest::{multipart, Client, StatusCode};
use shared::domain::{ProcessOutcome, SelectedFile};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

const FALLBACK_ARCHIVE_NAME: &str = "renamed_files.zip";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("service has no processed file named {filename}")]
    ResultMissing { filename: String },
    #[error("service has no processed files to download")]
    NothingToDownload,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Zip of every processed file, named by the service when it sends an
/// attachment header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipDownload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct ServiceClient {
    http: Client,
    base_url: Url,
}

impl ServiceClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Uploads the selection as one multipart request, every file under the
    /// `files` field, and decodes the per-file outcomes the service reports.
    pub async fn submit_batch(
        &self,
        files: &[SelectedFile],
    ) -> Result<Vec<ProcessOutcome>, ClientError> {
        let mut form = multipart::Form::new();
        for file in files {
            let bytes =
                tokio::fs::read(&file.path)
                    .await
                    .map_err(|source| ClientError::FileRead {
                        path: file.path.clone(),
                        source,
                    })?;
            let mime = mime_guess::from_path(&file.path).first_or_octet_stream();
            let part = multipart::Part::bytes(bytes)
                .file_name(file.filename.clone())
                .mime_str(mime.essence_str())?;
            form = form.part("files", part);
        }

        info!("upload: submitting batch of {} files", files.len());
        let outcomes: Vec<ProcessOutcome> = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        info!("upload: service returned {} outcomes", outcomes.len());
        Ok(outcomes)
    }

    /// Fetches one renamed file by the name the service assigned it.
    pub async fn download_result(&self, filename: &str) -> Result<Vec<u8>, ClientError> {
        let response = self
            .http
            .get(self.endpoint(&format!("download/{filename}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::ResultMissing {
                filename: filename.to_owned(),
            });
        }
        let bytes = response.error_for_status()?.bytes().await?;
        debug!("download: fetched {filename} ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Fetches the zip of every processed file the service still holds.
    pub async fn download_all(&self) -> Result<ZipDownload, ClientError> {
        let response = self.http.get(self.endpoint("download_all")).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NothingToDownload);
        }
        let response = response.error_for_status()?;
        let filename = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| FALLBACK_ARCHIVE_NAME.to_owned());
        let bytes = response.bytes().await?.to_vec();
        debug!("download: fetched archive {filename} ({} bytes)", bytes.len());
        Ok(ZipDownload { filename, bytes })
    }

    /// Asks the service to delete every processed file it still holds.
    pub async fn clear_results(&self) -> Result<(), ClientError> {
        self.http
            .get(self.endpoint("clear"))
            .send()
            .await?
            .error_for_status()?;
        info!("clear: service dropped its processed files");
        Ok(())
    }
}

fn attachment_filename(header: &str) -> Option<String> {
    let (_, raw) = header.split_once("filename=")?;
    let name = raw
        .split(';')
        .next()
        .unwrap_or(raw)
        .trim()
        .trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_owned())
    }
}
