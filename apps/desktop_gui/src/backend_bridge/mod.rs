//! Bridge between the egui UI thread and the async backend worker.

pub mod commands;
pub mod runtime;
