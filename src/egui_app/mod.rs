//! Shared egui UI modules.

/// Controller bridging the recognition pipeline to the egui UI.
pub mod controller;
pub(crate) mod jobs;
/// Shared state types for the egui UI.
pub mod state;
/// egui renderer for the application UI.
pub mod ui;
