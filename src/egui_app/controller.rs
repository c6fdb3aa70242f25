//! Controller bridging the recognition pipeline to the egui UI.
//!
//! Owns the drawing, the rasterizer and the injected classifier, and drives
//! the per-cycle pipeline: strokes accumulate, an explicit trigger snapshots
//! the bitmap, preprocessing plus inference run in the background, and the
//! outcome is presented unless it has been superseded.

use std::sync::Arc;

use egui::{Color32, Pos2};

use crate::classifier::Classifier;
use crate::egui_app::jobs::InferenceJobs;
use crate::egui_app::state::UiState;
use crate::present::{self, UNKNOWN_LABEL};
use crate::raster::{BACKGROUND, GrayBitmap, StrokeRasterizer};
use crate::stroke::StrokeRecorder;

/// Maintains drawing state and bridges the pipeline to the egui UI.
pub struct DigitController {
    /// Render-facing state consumed by the egui renderer.
    pub ui: UiState,
    recorder: StrokeRecorder,
    rasterizer: StrokeRasterizer,
    classifier: Arc<dyn Classifier>,
    jobs: InferenceJobs,
    bitmap: GrayBitmap,
    canvas_dirty: bool,
}

impl DigitController {
    /// Create a controller for a canvas of the given pixel dimensions.
    ///
    /// The classifier is supplied by the caller; the controller never looks
    /// one up from ambient state.
    pub fn new(classifier: Arc<dyn Classifier>, canvas_width: usize, canvas_height: usize) -> Self {
        let rasterizer = StrokeRasterizer::new(canvas_width, canvas_height);
        let bitmap = GrayBitmap::filled(canvas_width, canvas_height, BACKGROUND);
        Self {
            ui: UiState::default(),
            recorder: StrokeRecorder::default(),
            rasterizer,
            classifier,
            jobs: InferenceJobs::new(),
            bitmap,
            canvas_dirty: true,
        }
    }

    /// Handle pointer-down at a canvas-local position.
    pub fn pointer_down(&mut self, pos: Pos2) {
        if self.recorder.begin_stroke(pos) {
            self.drawing_changed();
        }
    }

    /// Handle pointer-move while the pointer is down.
    pub fn pointer_moved(&mut self, pos: Pos2) {
        if self.recorder.extend_stroke(pos) {
            self.drawing_changed();
        }
    }

    /// Handle pointer-up, finalizing the current stroke.
    pub fn pointer_up(&mut self) {
        if self.recorder.end_stroke() {
            self.drawing_changed();
        }
    }

    /// Discard the drawing and any pending recognition outcome.
    pub fn clear(&mut self) {
        self.recorder.clear();
        self.jobs.invalidate();
        self.ui.result_label = UNKNOWN_LABEL.to_string();
        self.set_status("Canvas cleared", StatusTone::Idle);
        self.drawing_changed();
    }

    /// Trigger one recognition cycle against the current bitmap.
    ///
    /// No-op while a cycle is already in flight. An empty drawing
    /// short-circuits to the unknown sentinel without invoking the
    /// classifier.
    pub fn recognize(&mut self) {
        if self.jobs.in_flight() {
            return;
        }
        if self.recorder.drawing().is_empty() {
            self.ui.result_label = UNKNOWN_LABEL.to_string();
            self.set_status("Nothing to recognize; draw a digit first", StatusTone::Info);
            return;
        }
        let generation = self.jobs.begin(self.classifier.clone(), self.bitmap.clone());
        tracing::debug!(generation, "Inference started");
        self.set_status("Recognizing…", StatusTone::Busy);
        self.refresh_controls();
    }

    /// Drain finished inference jobs, returning true if the UI changed.
    ///
    /// Outcomes whose generation no longer matches are discarded so a result
    /// from before a clear or a superseding trigger is never displayed.
    pub fn poll_results(&mut self) -> bool {
        let mut changed = false;
        while let Some(outcome) = self.jobs.try_recv() {
            if outcome.generation != self.jobs.current_generation() {
                tracing::debug!(
                    generation = outcome.generation,
                    current = self.jobs.current_generation(),
                    "Discarding stale inference outcome"
                );
                continue;
            }
            self.jobs.finish();
            match outcome.result {
                Ok(predictions) => {
                    let label = present::present(&predictions);
                    let confidence = present::top(&predictions)
                        .map(|p| p.confidence)
                        .unwrap_or(0.0);
                    tracing::info!(%label, confidence, "Recognition finished");
                    self.ui.result_label = label.clone();
                    self.set_status(
                        format!("Recognized {label} ({:.0}% confident)", confidence * 100.0),
                        StatusTone::Info,
                    );
                }
                Err(error) => {
                    tracing::warn!(%error, "Recognition failed");
                    self.ui.result_label = UNKNOWN_LABEL.to_string();
                    self.set_status(error.to_string(), StatusTone::Error);
                }
            }
            changed = true;
        }
        if changed {
            self.refresh_controls();
        }
        changed
    }

    /// Current canvas pixels for texture upload.
    pub fn bitmap(&self) -> &GrayBitmap {
        &self.bitmap
    }

    /// True once after each bitmap change; consumed by the renderer.
    pub fn take_canvas_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.canvas_dirty, false)
    }

    /// True while an inference job is outstanding.
    pub fn inference_in_flight(&self) -> bool {
        self.jobs.in_flight()
    }

    fn drawing_changed(&mut self) {
        self.bitmap = self.rasterizer.render(self.recorder.drawing());
        self.canvas_dirty = true;
        self.refresh_controls();
    }

    fn refresh_controls(&mut self) {
        let has_ink = !self.recorder.drawing().is_empty();
        self.ui.recognize_enabled = has_ink && !self.jobs.in_flight();
        self.ui.clear_enabled = has_ink;
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }
}

/// Tones for the footer status badge.
#[derive(Clone, Copy, Debug)]
pub enum StatusTone {
    /// Nothing happening.
    Idle,
    /// Recognition in progress.
    Busy,
    /// Informational outcome.
    Info,
    /// Recognition failure.
    Error,
}

fn status_badge(tone: StatusTone) -> (String, Color32) {
    match tone {
        StatusTone::Idle => ("Idle".into(), Color32::from_rgb(42, 42, 42)),
        StatusTone::Busy => ("Working".into(), Color32::from_rgb(31, 139, 255)),
        StatusTone::Info => ("Info".into(), Color32::from_rgb(64, 140, 112)),
        StatusTone::Error => ("Error".into(), Color32::from_rgb(192, 57, 43)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ClassifierError, Prediction, TensorShape, UnavailableClassifier};
    use egui::pos2;
    use ndarray::Array3;

    struct FixedClassifier {
        predictions: Vec<Prediction>,
    }

    impl Classifier for FixedClassifier {
        fn input_shape(&self) -> TensorShape {
            crate::classifier::MNIST_INPUT
        }

        fn predict(&self, _input: &Array3<f32>) -> Result<Vec<Prediction>, ClassifierError> {
            Ok(self.predictions.clone())
        }
    }

    fn wait_for_result(controller: &mut DigitController) {
        for _ in 0..200 {
            if controller.poll_results() {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("no inference outcome arrived");
    }

    fn draw_line(controller: &mut DigitController, from: Pos2, to: Pos2) {
        controller.pointer_down(from);
        controller.pointer_moved(to);
        controller.pointer_up();
    }

    #[test]
    fn recognize_presents_classifier_top_label() {
        let classifier = Arc::new(FixedClassifier {
            predictions: vec![Prediction {
                label: "1".into(),
                confidence: 0.99,
            }],
        });
        let mut controller = DigitController::new(classifier, 280, 280);
        draw_line(&mut controller, pos2(140.0, 40.0), pos2(140.0, 240.0));
        controller.recognize();
        assert!(controller.inference_in_flight());
        wait_for_result(&mut controller);
        assert_eq!(controller.ui.result_label, "1");
        assert!(!controller.inference_in_flight());
    }

    #[test]
    fn empty_drawing_short_circuits_to_sentinel() {
        let classifier = Arc::new(UnavailableClassifier::new("never called"));
        let mut controller = DigitController::new(classifier, 280, 280);
        controller.recognize();
        assert!(!controller.inference_in_flight());
        assert_eq!(controller.ui.result_label, UNKNOWN_LABEL);
    }

    #[test]
    fn recognize_is_disabled_until_something_is_drawn() {
        let classifier = Arc::new(UnavailableClassifier::new("unused"));
        let mut controller = DigitController::new(classifier, 280, 280);
        assert!(!controller.ui.recognize_enabled);
        draw_line(&mut controller, pos2(10.0, 10.0), pos2(30.0, 30.0));
        assert!(controller.ui.recognize_enabled);
    }

    #[test]
    fn clear_resets_canvas_and_result() {
        let classifier = Arc::new(FixedClassifier {
            predictions: vec![Prediction {
                label: "4".into(),
                confidence: 0.8,
            }],
        });
        let mut controller = DigitController::new(classifier, 280, 280);
        draw_line(&mut controller, pos2(50.0, 50.0), pos2(200.0, 200.0));
        controller.recognize();
        wait_for_result(&mut controller);
        assert_eq!(controller.ui.result_label, "4");

        controller.clear();
        assert_eq!(controller.ui.result_label, UNKNOWN_LABEL);
        assert!(controller.bitmap().is_blank());
        assert!(!controller.ui.recognize_enabled);
    }
}
