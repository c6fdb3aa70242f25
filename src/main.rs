#![deny(missing_docs)]
#![deny(warnings)]

//! Entry point for the egui-based Digitink UI.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use std::path::PathBuf;
use std::sync::Arc;

use digitink::classifier::{Classifier, MlpClassifier, UnavailableClassifier};
use digitink::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use digitink::{app_dirs, logging};
use eframe::egui;

/// Filename of the default model weights inside the app directory.
const DEFAULT_MODEL_FILE: &str = "mnist_mlp.json";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let classifier = load_classifier();

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(520.0, 420.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Digitink",
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(classifier)))),
    )?;
    Ok(())
}

/// Load the model referenced by `DIGITINK_MODEL` or the app-dir default.
///
/// A load failure is not fatal: an unavailable stand-in is injected so every
/// recognition surfaces the failure instead of crashing or silently guessing.
fn load_classifier() -> Arc<dyn Classifier> {
    let path = match model_path() {
        Ok(path) => path,
        Err(err) => {
            tracing::warn!(%err, "No model location available");
            return Arc::new(UnavailableClassifier::new(err));
        }
    };
    match MlpClassifier::from_path(&path) {
        Ok(model) => {
            tracing::info!(path = %path.display(), "Model loaded");
            Arc::new(model)
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "Failed to load model");
            Arc::new(UnavailableClassifier::new(err.to_string()))
        }
    }
}

fn model_path() -> Result<PathBuf, String> {
    if let Ok(path) = std::env::var("DIGITINK_MODEL") {
        return Ok(PathBuf::from(path));
    }
    app_dirs::app_root_dir()
        .map(|root| root.join(DEFAULT_MODEL_FILE))
        .map_err(|err| err.to_string())
}
