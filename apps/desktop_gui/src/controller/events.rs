//! UI/backend events and error modeling for the uploader controller.

use std::path::PathBuf;

use shared::domain::ProcessOutcome;

pub enum UiEvent {
    Info(String),
    BatchFinished { outcomes: Vec<ProcessOutcome> },
    DownloadFinished { filename: String, saved_to: PathBuf },
    ResultsCleared,
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Service,
    Storage,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submit,
    Download,
    Clear,
    General,
}

pub fn classify_submit_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("backend worker startup failure")
        || lower.contains("failed to build backend runtime")
    {
        "Backend worker startup failure; restart the app and retry.".to_string()
    } else if lower.contains("connection refused")
        || lower.contains("error sending request")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Barcode service unreachable; check the server URL and retry.".to_string()
    } else {
        format!("Upload error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("connection")
            || message_lower.contains("timed out")
            || message_lower.contains("timeout")
            || message_lower.contains("dns")
            || message_lower.contains("network")
            || message_lower.contains("unreachable")
            || message_lower.contains("error sending request")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else if message_lower.contains("no processed file")
            || message_lower.contains("not found")
            || message_lower.contains("status")
        {
            UiErrorCategory::Service
        } else if message_lower.contains("failed to read")
            || message_lower.contains("could not write")
            || message_lower.contains("could not prepare")
            || message_lower.contains("directory")
            || message_lower.contains("permission")
        {
            UiErrorCategory::Storage
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
