//! Desktop uploader for the barcode reading service. Files picked or dropped
//! here go up as one batch; the renamed results come back as downloads.

mod backend_bridge;
mod controller;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use crossbeam_channel::bounded;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::backend_bridge::runtime::{self, WorkerConfig};
use crate::controller::events::UiEvent;
use crate::ui::{StartupConfig, UploaderApp};

#[derive(Parser, Debug)]
#[command(author, version, about = "Desktop client for the barcode reader service")]
struct Args {
    /// Base URL of the barcode processing service.
    #[arg(long, default_value = upload_client::DEFAULT_SERVER_URL)]
    server_url: Url,

    /// Where downloaded results are written; defaults to the user downloads folder.
    #[arg(long)]
    downloads_dir: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let downloads_dir = match runtime::resolve_downloads_dir(args.downloads_dir.as_deref()) {
        Ok(dir) => dir,
        Err(err) => {
            tracing::error!("startup configuration error: {err:#}");
            std::process::exit(2);
        }
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(
        cmd_rx,
        ui_tx,
        WorkerConfig {
            server_url: args.server_url.clone(),
            downloads_dir,
        },
    );

    let startup = StartupConfig {
        server_url: args.server_url.to_string(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(shared::strings::WINDOW_TITLE)
            .with_inner_size([760.0, 680.0])
            .with_min_inner_size([560.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        shared::strings::WINDOW_TITLE,
        options,
        Box::new(|cc| {
            let tips_already_shown = cc
                .storage
                .and_then(|storage| storage.get_string(ui::app::TIPS_STORAGE_KEY))
                .map(|value| !value.is_empty())
                .unwrap_or(false);
            Ok(Box::new(UploaderApp::new(
                cmd_tx,
                ui_rx,
                startup,
                tips_already_shown,
            )))
        }),
    )
}
