//! Client-side screening of the current selection. The service enforces the
//! same limits again; this pass exists so the form can warn before upload.

use crate::domain::SelectedFile;
use crate::strings;

pub const MAX_FILE_SIZE_BYTES: u64 = 16 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Why a selected file was rejected. Extension wins when both would apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Extension,
    Size,
}

impl RejectReason {
    pub fn message(self) -> &'static str {
        match self {
            RejectReason::Extension => strings::INVALID_EXTENSION,
            RejectReason::Size => strings::OVERSIZED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFinding {
    pub filename: String,
    pub reason: RejectReason,
}

impl FileFinding {
    pub fn display_line(&self) -> String {
        format!("{} - {}", self.filename, self.reason.message())
    }
}

/// Outcome of screening one selection, with findings in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub valid_count: usize,
    pub findings: Vec<FileFinding>,
}

impl ValidationReport {
    pub fn total(&self) -> usize {
        self.valid_count + self.findings.len()
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn all_rejected(&self) -> bool {
        self.valid_count == 0 && self.has_findings()
    }
}

/// What the submit button should show and whether it accepts clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButtonState {
    Idle,
    Ready { valid_count: usize },
    AllRejected,
}

impl ActionButtonState {
    pub fn from_report(report: &ValidationReport) -> Self {
        if report.total() == 0 {
            ActionButtonState::Idle
        } else if report.valid_count == 0 {
            ActionButtonState::AllRejected
        } else {
            ActionButtonState::Ready {
                valid_count: report.valid_count,
            }
        }
    }

    pub fn label(self) -> String {
        match self {
            ActionButtonState::Idle => strings::ACTION_IDLE.to_owned(),
            ActionButtonState::Ready { valid_count } => strings::process_count_label(valid_count),
            ActionButtonState::AllRejected => strings::ACTION_NO_VALID_FILES.to_owned(),
        }
    }

    pub fn enabled(self) -> bool {
        matches!(self, ActionButtonState::Ready { .. })
    }
}

/// Screens every file in the selection. Each invalid file gets exactly one
/// finding; the extension check runs before the size check.
pub fn classify_selection(files: &[SelectedFile]) -> ValidationReport {
    let mut report = ValidationReport::default();
    for file in files {
        if let Some(reason) = reject_reason(file) {
            report.findings.push(FileFinding {
                filename: file.filename.clone(),
                reason,
            });
        } else {
            report.valid_count += 1;
        }
    }
    report
}

fn reject_reason(file: &SelectedFile) -> Option<RejectReason> {
    if !extension_allowed(&file.filename) {
        Some(RejectReason::Extension)
    } else if file.size_bytes > MAX_FILE_SIZE_BYTES {
        Some(RejectReason::Size)
    } else {
        None
    }
}

// The extension is everything after the last dot. A name with no dot counts
// whole, so "scanjpg" or "jpg" passes the extension check on its own merits.
fn extension_allowed(filename: &str) -> bool {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}
