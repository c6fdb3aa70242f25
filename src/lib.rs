//! Library exports for reuse in integration tests.
/// Application directory helpers.
pub mod app_dirs;
/// Classifier boundary and the bundled MLP model.
pub mod classifier;
/// Shared egui UI modules.
pub mod egui_app;
/// Logging setup.
pub mod logging;
/// Bitmap-to-tensor normalization.
pub mod preprocess;
/// Prediction-to-label presentation.
pub mod present;
/// Stroke rasterization.
pub mod raster;
/// Stroke capture.
pub mod stroke;
