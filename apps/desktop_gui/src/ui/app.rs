//! App shell for the uploader: form state plus the results surface against
//! the barcode service.

use std::collections::HashMap;
use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender};

use shared::domain::{BatchSummary, ProcessOutcome, SelectedFile};
use shared::strings;
use shared::validate::{classify_selection, ActionButtonState, ValidationReport};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_submit_failure, UiErrorCategory, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub(crate) const TIPS_STORAGE_KEY: &str = "shortcuts-shown";

const NOTICE_SECONDS: f64 = 5.0;
const DOWNLOAD_REVERT_SECONDS: f64 = 3.0;
const TIPS_DELAY_SECONDS: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeSeverity {
    Success,
    Error,
}

impl NoticeSeverity {
    fn colors(self) -> (egui::Color32, egui::Color32) {
        match self {
            NoticeSeverity::Success => (
                egui::Color32::from_rgb(22, 58, 34),
                egui::Color32::from_rgb(141, 224, 163),
            ),
            NoticeSeverity::Error => (
                egui::Color32::from_rgb(66, 24, 24),
                egui::Color32::from_rgb(240, 148, 148),
            ),
        }
    }
}

#[derive(Debug, Clone)]
struct Notice {
    severity: NoticeSeverity,
    text: String,
    expires_at: f64,
}

/// One-shot timer mirroring the first-visit tips behavior. The toast appears
/// only when the deadline passes with nothing selected and the persisted
/// flag still unset; the timer never re-arms.
#[derive(Debug, Clone, Copy)]
struct TipsToastState {
    already_shown: bool,
    visible: bool,
    due_at: Option<f64>,
    timer_done: bool,
}

impl TipsToastState {
    fn new(already_shown: bool) -> Self {
        Self {
            already_shown,
            visible: false,
            due_at: None,
            timer_done: false,
        }
    }

    fn tick(&mut self, now: f64, selection_empty: bool) {
        if self.timer_done {
            return;
        }
        match self.due_at {
            None => self.due_at = Some(now + TIPS_DELAY_SECONDS),
            Some(due) if now >= due => {
                self.timer_done = true;
                if selection_empty && !self.already_shown {
                    self.visible = true;
                    self.already_shown = true;
                }
            }
            Some(_) => {}
        }
    }

    fn dismiss(&mut self) {
        self.visible = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmitDecision {
    EmptySelection,
    Queue,
}

fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Service => "Service",
        UiErrorCategory::Storage => "Storage",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

pub struct UploaderApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,

    selection: Vec<SelectedFile>,
    report: ValidationReport,
    submitting: bool,

    outcomes: Vec<ProcessOutcome>,
    notices: Vec<Notice>,
    // Cosmetic reversion deadlines, not tied to transfer completion.
    download_labels: HashMap<String, f64>,
    download_all_revert_at: Option<f64>,

    drag_active: bool,
    tips: TipsToastState,

    status: String,
    frame_time: f64,
}

impl UploaderApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
        tips_already_shown: bool,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: startup.server_url,
            selection: Vec::new(),
            report: ValidationReport::default(),
            submitting: false,
            outcomes: Vec::new(),
            notices: Vec::new(),
            download_labels: HashMap::new(),
            download_all_revert_at: None,
            drag_active: false,
            tips: TipsToastState::new(tips_already_shown),
            status: "Backend worker starting...".to_string(),
            frame_time: 0.0,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::BatchFinished { outcomes } => {
                    self.submitting = false;
                    self.selection.clear();
                    self.report = ValidationReport::default();

                    let summary = BatchSummary::from_outcomes(&outcomes);
                    if summary.success_count > 0 {
                        self.push_notice(
                            NoticeSeverity::Success,
                            strings::batch_success_notice(summary.success_count),
                        );
                    }
                    if summary.error_count > 0 {
                        self.push_notice(
                            NoticeSeverity::Error,
                            strings::batch_failure_notice(summary.error_count),
                        );
                    }
                    self.status = format!("Processed batch of {} files", outcomes.len());
                    self.outcomes = outcomes;
                }
                UiEvent::DownloadFinished { filename, saved_to } => {
                    self.status = format!("Saved {filename} to {}", saved_to.display());
                }
                UiEvent::ResultsCleared => {
                    self.outcomes.clear();
                    self.download_labels.clear();
                    self.download_all_revert_at = None;
                    self.push_notice(NoticeSeverity::Success, strings::CLEARED_NOTICE.to_string());
                    self.status = "Results cleared".to_string();
                }
                UiEvent::Error(err) => {
                    match err.context() {
                        UiErrorContext::Submit => {
                            // Keep the selection so the batch can be retried.
                            self.submitting = false;
                            self.push_notice(
                                NoticeSeverity::Error,
                                strings::generic_error_notice(err.message()),
                            );
                            self.status = classify_submit_failure(err.message());
                        }
                        UiErrorContext::Download => {
                            self.push_notice(
                                NoticeSeverity::Error,
                                strings::DOWNLOAD_ERROR.to_string(),
                            );
                            self.status =
                                format!("{} error: {}", err_label(err.category()), err.message());
                        }
                        UiErrorContext::Clear => {
                            self.push_notice(
                                NoticeSeverity::Error,
                                strings::CLEAR_ERROR.to_string(),
                            );
                            self.status =
                                format!("{} error: {}", err_label(err.category()), err.message());
                        }
                        UiErrorContext::BackendStartup | UiErrorContext::General => {
                            self.push_notice(
                                NoticeSeverity::Error,
                                strings::generic_error_notice(err.message()),
                            );
                            self.status =
                                format!("{} error: {}", err_label(err.category()), err.message());
                        }
                    }
                }
            }
        }
    }

    fn push_notice(&mut self, severity: NoticeSeverity, text: String) {
        self.notices.push(Notice {
            severity,
            text,
            expires_at: self.frame_time + NOTICE_SECONDS,
        });
    }

    fn prune_timers(&mut self) {
        let now = self.frame_time;
        self.notices.retain(|notice| now < notice.expires_at);
        self.download_labels.retain(|_, revert_at| now < *revert_at);
        if self.download_all_revert_at.map(|at| now >= at).unwrap_or(false) {
            self.download_all_revert_at = None;
        }
    }

    fn apply_selection(&mut self, paths: Vec<PathBuf>) {
        self.selection = paths
            .into_iter()
            .map(|path| {
                let size_bytes = std::fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
                SelectedFile::new(path, size_bytes)
            })
            .collect();
        self.refresh_report();
    }

    fn clear_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.selection.clear();
        self.refresh_report();
    }

    fn refresh_report(&mut self) {
        self.report = classify_selection(&self.selection);
    }

    fn open_file_picker(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title(strings::PICKER_TITLE)
            .add_filter("รูปภาพ", &["jpg", "jpeg", "png", "gif", "bmp", "webp"])
            .pick_files();
        if let Some(paths) = picked {
            if !paths.is_empty() {
                self.apply_selection(paths);
            }
        }
    }

    fn submit_decision(&self) -> SubmitDecision {
        if self.selection.is_empty() {
            SubmitDecision::EmptySelection
        } else {
            SubmitDecision::Queue
        }
    }

    fn try_submit(&mut self) {
        match self.submit_decision() {
            SubmitDecision::EmptySelection => {
                let _ = rfd::MessageDialog::new()
                    .set_title(strings::WINDOW_TITLE)
                    .set_description(strings::EMPTY_SELECTION_ALERT)
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
            }
            SubmitDecision::Queue => {
                let queued = dispatch_backend_command(
                    &self.cmd_tx,
                    BackendCommand::SubmitBatch {
                        files: self.selection.clone(),
                    },
                    &mut self.status,
                );
                if queued {
                    self.submitting = true;
                }
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if self.submitting {
            return;
        }
        // Ctrl on Windows/Linux, Cmd on macOS.
        let open_picker = ctx.input(|i| i.modifiers.command && i.key_pressed(egui::Key::U));
        if open_picker {
            self.open_file_picker();
        }
        let clear = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if clear {
            self.clear_selection();
        }
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        if self.submitting {
            self.drag_active = false;
            return;
        }
        self.drag_active = ctx.input(|i| !i.raw.hovered_files.is_empty());

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.drag_active = false;
            self.apply_selection(dropped);
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&self.status)
                        .size(12.0)
                        .color(ui.visuals().weak_text_color()),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&self.server_url)
                            .size(12.0)
                            .color(ui.visuals().weak_text_color()),
                    );
                });
            });
        });
    }

    fn show_main_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(strings::WINDOW_TITLE).strong().size(20.0));
                ui.label(
                    egui::RichText::new(strings::SUBTITLE)
                        .size(13.0)
                        .color(ui.visuals().weak_text_color()),
                );
            });
            ui.add_space(10.0);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.show_notices(ui);
                    self.show_upload_section(ui);
                    if self.report.has_findings() {
                        ui.add_space(8.0);
                        self.show_warning_panel(ui);
                    }
                    ui.add_space(12.0);
                    self.show_action_row(ui);
                    if !self.outcomes.is_empty() {
                        ui.add_space(16.0);
                        self.show_results_section(ui);
                    }
                });
        });
    }

    fn show_notices(&mut self, ui: &mut egui::Ui) {
        let mut dismissed: Option<usize> = None;
        for (index, notice) in self.notices.iter().enumerate() {
            let (fill, text_color) = notice.severity.colors();
            egui::Frame::new()
                .fill(fill)
                .corner_radius(egui::CornerRadius::same(6))
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&notice.text).color(text_color));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("✕").clicked() {
                                dismissed = Some(index);
                            }
                        });
                    });
                });
            ui.add_space(4.0);
        }
        if let Some(index) = dismissed {
            self.notices.remove(index);
        }
    }

    fn show_upload_section(&mut self, ui: &mut egui::Ui) {
        let (fill, stroke) = if self.drag_active {
            (
                ui.visuals().selection.bg_fill.linear_multiply(0.2),
                egui::Stroke::new(2.0, ui.visuals().selection.stroke.color),
            )
        } else {
            (
                ui.visuals().extreme_bg_color,
                egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
            )
        };

        egui::Frame::new()
            .fill(fill)
            .stroke(stroke)
            .corner_radius(egui::CornerRadius::same(8))
            .inner_margin(egui::Margin::symmetric(14, 12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(strings::PICK_SECTION_LABEL).strong());
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    let pick_button = egui::Button::new(strings::PICK_BUTTON);
                    if ui.add_enabled(!self.submitting, pick_button).clicked() {
                        self.open_file_picker();
                    }
                    ui.label(
                        egui::RichText::new(strings::DROP_HINT)
                            .color(ui.visuals().weak_text_color()),
                    );
                });
                if !self.selection.is_empty() {
                    ui.add_space(6.0);
                    for file in &self.selection {
                        ui.label(format!(
                            "{} ({})",
                            file.filename,
                            human_readable_bytes(file.size_bytes)
                        ));
                    }
                }
            });
    }

    fn show_warning_panel(&mut self, ui: &mut egui::Ui) {
        let warn = ui.visuals().warn_fg_color;
        egui::Frame::new()
            .fill(ui.visuals().extreme_bg_color)
            .stroke(egui::Stroke::new(1.0, warn))
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    egui::RichText::new(strings::WARNING_PANEL_TITLE)
                        .strong()
                        .color(warn),
                );
                for finding in &self.report.findings {
                    ui.label(format!("• {}", finding.display_line()));
                }
            });
    }

    fn show_action_row(&mut self, ui: &mut egui::Ui) {
        let button_state = ActionButtonState::from_report(&self.report);
        let label = if self.submitting {
            strings::ACTION_SUBMITTING.to_string()
        } else {
            button_state.label()
        };
        let enabled = !self.submitting && button_state.enabled();

        ui.horizontal(|ui| {
            let button = egui::Button::new(egui::RichText::new(label).strong())
                .min_size(egui::vec2(220.0, 36.0));
            if ui.add_enabled(enabled, button).clicked() {
                self.try_submit();
            }
            if self.submitting {
                ui.add(egui::Spinner::new());
            }
        });
    }

    fn show_results_section(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new(strings::RESULTS_HEADER).strong().size(16.0));
        ui.add_space(6.0);

        let mut download_clicks: Vec<String> = Vec::new();
        let mut download_all_clicked = false;
        let mut clear_clicked = false;

        for (index, outcome) in self.outcomes.iter().enumerate() {
            egui::Frame::new()
                .fill(ui.visuals().faint_bg_color)
                .corner_radius(egui::CornerRadius::same(6))
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            if outcome.succeeded() {
                                let renamed = outcome
                                    .new_filename
                                    .as_deref()
                                    .unwrap_or(&outcome.original_filename);
                                ui.label(egui::RichText::new(renamed).strong());
                                let barcode = outcome.barcode_text.as_deref().unwrap_or("-");
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{} | Barcode: {barcode}",
                                        outcome.original_filename
                                    ))
                                    .size(12.0)
                                    .color(ui.visuals().weak_text_color()),
                                );
                            } else {
                                ui.label(
                                    egui::RichText::new(&outcome.original_filename).strong(),
                                );
                                let detail =
                                    outcome.error.as_deref().unwrap_or(strings::DOWNLOAD_ERROR);
                                ui.label(
                                    egui::RichText::new(detail)
                                        .size(12.0)
                                        .color(ui.visuals().error_fg_color),
                                );
                            }
                        });
                        if outcome.succeeded() {
                            if let Some(renamed) = outcome.new_filename.as_deref() {
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        let pending =
                                            self.download_labels.contains_key(renamed);
                                        let label = if pending {
                                            strings::DOWNLOADING
                                        } else {
                                            strings::ROW_DOWNLOAD
                                        };
                                        let button = egui::Button::new(label);
                                        if ui.add_enabled(!pending, button).clicked() {
                                            download_clicks.push(renamed.to_string());
                                        }
                                        if pending {
                                            ui.add(egui::Spinner::new().size(12.0));
                                        }
                                    },
                                );
                            }
                        }
                    });
                });
            if index + 1 < self.outcomes.len() {
                ui.add_space(4.0);
            }
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let all_pending = self.download_all_revert_at.is_some();
            let all_label = if all_pending {
                strings::DOWNLOADING
            } else {
                strings::DOWNLOAD_ALL
            };
            if ui
                .add_enabled(!all_pending, egui::Button::new(all_label))
                .clicked()
            {
                download_all_clicked = true;
            }
            if all_pending {
                ui.add(egui::Spinner::new().size(12.0));
            }
            if ui.button(strings::CLEAR_RESULTS).clicked() {
                clear_clicked = true;
            }
        });

        for filename in download_clicks {
            self.download_labels
                .insert(filename.clone(), self.frame_time + DOWNLOAD_REVERT_SECONDS);
            dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::DownloadResult { filename },
                &mut self.status,
            );
        }
        if download_all_clicked {
            self.download_all_revert_at = Some(self.frame_time + DOWNLOAD_REVERT_SECONDS);
            dispatch_backend_command(&self.cmd_tx, BackendCommand::DownloadAll, &mut self.status);
        }
        if clear_clicked {
            dispatch_backend_command(&self.cmd_tx, BackendCommand::ClearResults, &mut self.status);
        }
    }

    fn show_processing_modal(&mut self, ctx: &egui::Context) {
        // Re-shown every frame while the batch is in flight; backdrop clicks
        // and Escape are deliberately not honored.
        egui::Modal::new(egui::Id::new("processing_modal")).show(ctx, |ui| {
            ui.set_width(320.0);
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.add(egui::Spinner::new().size(28.0));
                ui.add_space(8.0);
                ui.label(egui::RichText::new(strings::MODAL_TITLE).strong().size(16.0));
                ui.label(strings::MODAL_BODY);
                ui.add_space(8.0);
            });
        });
    }

    fn show_tips_toast(&mut self, ctx: &egui::Context) {
        let screen = ctx.screen_rect();
        let pos = egui::pos2(screen.right() - 270.0, screen.bottom() - 120.0);
        egui::Area::new(egui::Id::new("shortcuts_toast"))
            .fixed_pos(pos)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(ui.visuals().extreme_bg_color)
                    .stroke(egui::Stroke::new(
                        1.0,
                        ui.visuals().widgets.noninteractive.bg_stroke.color,
                    ))
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::symmetric(12, 10))
                    .show(ui, |ui| {
                        ui.set_width(230.0);
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(strings::SHORTCUTS_TITLE).strong());
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    if ui.small_button("✕").clicked() {
                                        self.tips.dismiss();
                                    }
                                },
                            );
                        });
                        ui.add_space(4.0);
                        ui.label(strings::SHORTCUT_PICK);
                        ui.label(strings::SHORTCUT_CLEAR);
                    });
            });
    }
}

impl eframe::App for UploaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame_time = ctx.input(|i| i.time);

        self.process_ui_events();
        self.prune_timers();
        self.tips.tick(self.frame_time, self.selection.is_empty());
        self.handle_shortcuts(ctx);
        self.handle_drag_and_drop(ctx);

        self.show_status_bar(ctx);
        self.show_main_panel(ctx);
        if self.submitting {
            self.show_processing_modal(ctx);
        }
        if self.tips.visible {
            self.show_tips_toast(ctx);
        }

        if self.submitting {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        persist_tips_flag(storage, &self.tips);
    }
}

fn persist_tips_flag(storage: &mut dyn eframe::Storage, tips: &TipsToastState) {
    if tips.already_shown {
        storage.set_string(TIPS_STORAGE_KEY, "true".to_string());
    }
}

fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        return format!("{bytes} B");
    }
    if bytes < MB {
        return format_scaled_unit(bytes, KB, "KB");
    }
    if bytes < GB {
        return format_scaled_unit(bytes, MB, "MB");
    }
    format_scaled_unit(bytes, GB, "GB")
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.1}");
    let compact_value = value_text.strip_suffix(".0").unwrap_or(&value_text);
    format!("{compact_value} {unit_label}")
}

#[cfg(test)]
mod tests {
    use super::{
        human_readable_bytes, persist_tips_flag, NoticeSeverity, StartupConfig, SubmitDecision,
        TipsToastState, UploaderApp, DOWNLOAD_REVERT_SECONDS, TIPS_STORAGE_KEY,
    };
    use crate::backend_bridge::commands::BackendCommand;
    use crate::controller::events::{
        classify_submit_failure, UiError, UiErrorCategory, UiErrorContext, UiEvent,
    };
    use crossbeam_channel::{Receiver, Sender};
    use shared::domain::{ProcessOutcome, ProcessStatus, SelectedFile};
    use shared::strings;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn test_app() -> (UploaderApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(8);
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(8);
        let app = UploaderApp::new(
            cmd_tx,
            ui_rx,
            StartupConfig {
                server_url: "http://127.0.0.1:5000".to_string(),
            },
            false,
        );
        (app, cmd_rx, ui_tx)
    }

    fn success_outcome(original: &str, renamed: &str) -> ProcessOutcome {
        ProcessOutcome {
            original_filename: original.to_string(),
            new_filename: Some(renamed.to_string()),
            barcode_text: Some("1234567890".to_string()),
            status: ProcessStatus::Success,
            error: None,
        }
    }

    fn error_outcome(original: &str) -> ProcessOutcome {
        ProcessOutcome {
            original_filename: original.to_string(),
            new_filename: None,
            barcode_text: None,
            status: ProcessStatus::Error,
            error: Some("ไม่พบ barcode ในภาพนี้".to_string()),
        }
    }

    fn write_temp(name: &str, len: usize) -> PathBuf {
        let dir = std::env::temp_dir().join("barcode_gui_app_tests");
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(name);
        std::fs::write(&path, vec![0u8; len]).expect("write temp file");
        path
    }

    #[test]
    fn formats_file_sizes_readably() {
        assert_eq!(human_readable_bytes(0), "0 B");
        assert_eq!(human_readable_bytes(1023), "1023 B");
        assert_eq!(human_readable_bytes(1024), "1 KB");
        assert_eq!(human_readable_bytes(1536), "1.5 KB");
        assert_eq!(human_readable_bytes(2 * 1024 * 1024), "2 MB");
        assert_eq!(human_readable_bytes(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn submit_decision_guards_empty_selection() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        assert_eq!(app.submit_decision(), SubmitDecision::EmptySelection);

        app.selection = vec![SelectedFile::new("scan.jpg", 1024)];
        app.refresh_report();
        assert_eq!(app.submit_decision(), SubmitDecision::Queue);
    }

    #[test]
    fn queued_submission_locks_the_form_and_sends_the_whole_selection() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        app.selection = vec![
            SelectedFile::new("a.jpg", 1024),
            SelectedFile::new("b.png", 1024),
        ];
        app.refresh_report();

        app.try_submit();

        assert!(app.submitting);
        match cmd_rx.try_recv().expect("command queued") {
            BackendCommand::SubmitBatch { files } => {
                assert_eq!(files.len(), 2);
                assert_eq!(files[0].filename, "a.jpg");
            }
            _ => panic!("expected submit_batch"),
        }
    }

    #[test]
    fn submission_is_not_queued_when_the_worker_is_gone() {
        let (mut app, cmd_rx, _ui_tx) = test_app();
        drop(cmd_rx);
        app.selection = vec![SelectedFile::new("scan.jpg", 1024)];
        app.refresh_report();

        app.try_submit();

        assert!(!app.submitting);
        assert!(app.status.contains("disconnected"));
    }

    #[test]
    fn batch_completion_unlocks_resets_selection_and_raises_notices() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.submitting = true;
        app.selection = vec![SelectedFile::new("a.jpg", 1024)];
        app.refresh_report();
        app.frame_time = 10.0;

        ui_tx
            .send(UiEvent::BatchFinished {
                outcomes: vec![
                    success_outcome("a.jpg", "1234567890.jpg"),
                    error_outcome("blank.jpg"),
                ],
            })
            .expect("send event");
        app.process_ui_events();

        assert!(!app.submitting);
        assert!(app.selection.is_empty());
        assert!(!app.report.has_findings());
        assert_eq!(app.outcomes.len(), 2);

        let texts: Vec<&str> = app.notices.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["ประมวลผลสำเร็จ 1 ไฟล์", "ประมวลผลไม่สำเร็จ 1 ไฟล์"]
        );
        assert!(app.notices.iter().all(|n| n.expires_at == 15.0));
    }

    #[test]
    fn batch_failure_unlocks_but_keeps_the_selection_for_retry() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.submitting = true;
        app.selection = vec![SelectedFile::new("a.jpg", 1024)];
        app.refresh_report();

        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::Submit,
                "error sending request for url (http://127.0.0.1:5000/upload)",
            )))
            .expect("send event");
        app.process_ui_events();

        assert!(!app.submitting);
        assert_eq!(app.selection.len(), 1);
        assert_eq!(app.notices.len(), 1);
        assert_eq!(app.notices[0].severity, NoticeSeverity::Error);
        assert!(app.notices[0].text.starts_with("เกิดข้อผิดพลาด"));
        assert!(app.status.contains("unreachable"));
    }

    #[test]
    fn download_failure_raises_the_download_notice() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::Download,
                "no processed file named missing.jpg on the service",
            )))
            .expect("send event");
        app.process_ui_events();

        assert_eq!(app.notices.len(), 1);
        assert_eq!(app.notices[0].text, strings::DOWNLOAD_ERROR);
    }

    #[test]
    fn cleared_results_empty_the_list_and_confirm_in_thai() {
        let (mut app, _cmd_rx, ui_tx) = test_app();
        app.outcomes = vec![success_outcome("a.jpg", "1234567890.jpg")];
        app.download_labels
            .insert("1234567890.jpg".to_string(), 99.0);

        ui_tx.send(UiEvent::ResultsCleared).expect("send event");
        app.process_ui_events();

        assert!(app.outcomes.is_empty());
        assert!(app.download_labels.is_empty());
        assert_eq!(app.notices[0].text, strings::CLEARED_NOTICE);
    }

    #[test]
    fn notices_expire_five_seconds_after_render() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.frame_time = 10.0;
        app.push_notice(NoticeSeverity::Success, "done".to_string());

        app.frame_time = 14.9;
        app.prune_timers();
        assert_eq!(app.notices.len(), 1);

        app.frame_time = 15.0;
        app.prune_timers();
        assert!(app.notices.is_empty());
    }

    #[test]
    fn download_labels_revert_after_three_seconds() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.frame_time = 5.0;
        app.download_labels
            .insert("1234567890.jpg".to_string(), app.frame_time + DOWNLOAD_REVERT_SECONDS);

        app.frame_time = 7.9;
        app.prune_timers();
        assert!(app.download_labels.contains_key("1234567890.jpg"));

        app.frame_time = 8.0;
        app.prune_timers();
        assert!(app.download_labels.is_empty());
    }

    #[test]
    fn download_all_label_reverts_on_the_same_clock() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.frame_time = 5.0;
        app.download_all_revert_at = Some(app.frame_time + DOWNLOAD_REVERT_SECONDS);

        app.frame_time = 7.9;
        app.prune_timers();
        assert!(app.download_all_revert_at.is_some());

        app.frame_time = 8.0;
        app.prune_timers();
        assert!(app.download_all_revert_at.is_none());
    }

    #[test]
    fn escape_clears_the_selection_and_rechecks() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        app.selection = vec![SelectedFile::new("b.png", 1024)];
        app.refresh_report();
        assert!(app.report.has_findings());

        app.clear_selection();

        assert!(app.selection.is_empty());
        assert!(!app.report.has_findings());
        assert_eq!(app.report.valid_count, 0);
    }

    #[test]
    fn dropped_paths_flow_through_the_same_validation_as_the_picker() {
        let (mut app, _cmd_rx, _ui_tx) = test_app();
        let jpg = write_temp("a.jpg", 1024);
        let png = write_temp("b.png", 1024);

        app.apply_selection(vec![jpg.clone(), png.clone()]);
        let report_from_drop = app.report.clone();

        let (mut picker_app, _cmd_rx2, _ui_tx2) = test_app();
        picker_app.apply_selection(vec![jpg, png]);

        assert_eq!(picker_app.report, report_from_drop);
        assert_eq!(report_from_drop.valid_count, 1);
        assert_eq!(
            report_from_drop.findings[0].display_line(),
            "b.png - ไฟล์ต้องเป็น .jpg หรือ .jpeg"
        );
        assert_eq!(app.selection[0].size_bytes, 1024);
    }

    #[test]
    fn tips_toast_fires_once_after_the_delay() {
        let mut tips = TipsToastState::new(false);
        tips.tick(1.0, true);
        assert!(!tips.visible);

        tips.tick(3.9, true);
        assert!(!tips.visible);

        tips.tick(4.0, true);
        assert!(tips.visible);
        assert!(tips.already_shown);

        tips.dismiss();
        assert!(!tips.visible);
        assert!(tips.already_shown);
    }

    #[test]
    fn tips_toast_is_skipped_when_files_are_selected_at_the_deadline() {
        let mut tips = TipsToastState::new(false);
        tips.tick(1.0, false);
        tips.tick(4.5, false);
        assert!(!tips.visible);
        assert!(!tips.already_shown);

        // The timer fires once; an empty selection later never revives it.
        tips.tick(20.0, true);
        assert!(!tips.visible);
    }

    #[test]
    fn tips_toast_never_returns_once_the_flag_is_persisted() {
        let mut tips = TipsToastState::new(true);
        tips.tick(1.0, true);
        tips.tick(10.0, true);
        assert!(!tips.visible);
    }

    struct MapStorage {
        values: HashMap<String, String>,
    }

    impl eframe::Storage for MapStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.values.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn tips_flag_is_persisted_only_once_shown() {
        let mut storage = MapStorage {
            values: HashMap::new(),
        };

        persist_tips_flag(&mut storage, &TipsToastState::new(false));
        assert!(storage.values.is_empty());

        let mut tips = TipsToastState::new(false);
        tips.tick(0.0, true);
        tips.tick(3.0, true);
        persist_tips_flag(&mut storage, &tips);
        assert_eq!(
            storage.values.get(TIPS_STORAGE_KEY).map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn classifies_connection_failures_as_transport_errors() {
        let err = UiError::from_message(
            UiErrorContext::Submit,
            "error sending request for url (http://127.0.0.1:5000/upload)",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);

        let missing = UiError::from_message(
            UiErrorContext::Download,
            "no processed file named missing.jpg on the service",
        );
        assert_eq!(missing.category(), UiErrorCategory::Service);
    }

    #[test]
    fn submit_failure_status_lines_offer_guidance() {
        assert_eq!(
            classify_submit_failure("connection refused"),
            "Barcode service unreachable; check the server URL and retry."
        );
        assert!(classify_submit_failure("multipart boundary mismatch")
            .starts_with("Upload error:"));
    }
}
