//! UI layer for the uploader desktop app.

pub mod app;

pub use app::{StartupConfig, UploaderApp};
