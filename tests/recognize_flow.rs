//! End-to-end tests of the recognition pipeline through the controller.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use digitink::classifier::{
    Classifier, ClassifierError, MNIST_INPUT, Prediction, TensorShape, UnavailableClassifier,
};
use digitink::egui_app::controller::DigitController;
use digitink::present::UNKNOWN_LABEL;
use egui::pos2;
use ndarray::Array3;

/// Stub that replays scripted (delay, outcome) pairs, one per predict call.
struct ScriptedClassifier {
    calls: Mutex<VecDeque<(Duration, Result<Vec<Prediction>, String>)>>,
}

impl ScriptedClassifier {
    fn new(calls: Vec<(Duration, Result<Vec<Prediction>, String>)>) -> Self {
        Self {
            calls: Mutex::new(calls.into()),
        }
    }
}

impl Classifier for ScriptedClassifier {
    fn input_shape(&self) -> TensorShape {
        MNIST_INPUT
    }

    fn predict(&self, input: &Array3<f32>) -> Result<Vec<Prediction>, ClassifierError> {
        assert!(self.input_shape().matches(input));
        let next = self
            .calls
            .lock()
            .expect("scripted calls mutex poisoned")
            .pop_front();
        match next {
            Some((delay, outcome)) => {
                thread::sleep(delay);
                outcome.map_err(ClassifierError::Unavailable)
            }
            None => Ok(Vec::new()),
        }
    }
}

fn prediction(label: &str, confidence: f32) -> Prediction {
    Prediction {
        label: label.into(),
        confidence,
    }
}

/// Stub that answers based on stroke orientation: a vertical stroke gets a
/// slow "9", anything else an immediate "1". Keying off the tensor content
/// keeps the slow/fast pairing deterministic across worker threads.
struct OrientationClassifier;

impl Classifier for OrientationClassifier {
    fn input_shape(&self) -> TensorShape {
        MNIST_INPUT
    }

    fn predict(&self, input: &Array3<f32>) -> Result<Vec<Prediction>, ClassifierError> {
        // A centered vertical stroke inks column 14 well above the middle row.
        let vertical = input[[5, 14, 0]] > 0.0;
        if vertical {
            thread::sleep(Duration::from_millis(300));
            Ok(vec![prediction("9", 0.95)])
        } else {
            Ok(vec![prediction("1", 0.90)])
        }
    }
}

fn draw_vertical_stroke(controller: &mut DigitController) {
    controller.pointer_down(pos2(140.0, 40.0));
    for step in 1..20 {
        controller.pointer_moved(pos2(140.0, 40.0 + step as f32 * 10.0));
    }
    controller.pointer_up();
}

fn draw_horizontal_stroke(controller: &mut DigitController) {
    controller.pointer_down(pos2(40.0, 140.0));
    for step in 1..20 {
        controller.pointer_moved(pos2(40.0 + step as f32 * 10.0, 140.0));
    }
    controller.pointer_up();
}

fn poll_until_change(controller: &mut DigitController, timeout: Duration) -> bool {
    let deadline = std::time::Instant::now() + timeout;
    while std::time::Instant::now() < deadline {
        if controller.poll_results() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn vertical_stroke_is_recognized_as_one() {
    let classifier = Arc::new(ScriptedClassifier::new(vec![(
        Duration::ZERO,
        Ok(vec![prediction("1", 0.99)]),
    )]));
    let mut controller = DigitController::new(classifier, 280, 280);

    draw_vertical_stroke(&mut controller);
    assert!(!controller.bitmap().is_blank());

    controller.recognize();
    assert!(poll_until_change(&mut controller, Duration::from_secs(2)));
    assert_eq!(controller.ui.result_label, "1");
}

#[test]
fn stale_result_from_before_clear_is_never_displayed() {
    // The first recognition is slow and would answer "9"; after a clear, the
    // second answers "1" immediately and so returns first. Only the
    // later-triggered result may ever be shown.
    let classifier = Arc::new(OrientationClassifier);
    let mut controller = DigitController::new(classifier, 280, 280);

    draw_vertical_stroke(&mut controller);
    controller.recognize();
    assert!(controller.inference_in_flight());

    controller.clear();
    assert!(!controller.inference_in_flight());

    draw_horizontal_stroke(&mut controller);
    controller.recognize();
    assert!(poll_until_change(&mut controller, Duration::from_secs(2)));
    assert_eq!(controller.ui.result_label, "1");

    // Let the slow first call finish and verify its outcome is discarded.
    thread::sleep(Duration::from_millis(400));
    controller.poll_results();
    assert_eq!(controller.ui.result_label, "1");
}

#[test]
fn unavailable_classifier_degrades_to_unknown_label() {
    let classifier = Arc::new(UnavailableClassifier::new("model file missing"));
    let mut controller = DigitController::new(classifier, 280, 280);

    draw_vertical_stroke(&mut controller);
    controller.recognize();
    assert!(poll_until_change(&mut controller, Duration::from_secs(2)));
    assert_eq!(controller.ui.result_label, UNKNOWN_LABEL);
    assert_eq!(controller.ui.status.badge_label, "Error");
}

#[test]
fn inference_failure_reports_error_reason() {
    let classifier = Arc::new(ScriptedClassifier::new(vec![(
        Duration::ZERO,
        Err("backend went away".to_string()),
    )]));
    let mut controller = DigitController::new(classifier, 280, 280);

    draw_vertical_stroke(&mut controller);
    controller.recognize();
    assert!(poll_until_change(&mut controller, Duration::from_secs(2)));
    assert_eq!(controller.ui.result_label, UNKNOWN_LABEL);
    assert!(controller.ui.status.text.contains("backend went away"));
}
