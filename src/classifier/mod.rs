//! Boundary to the externally supplied digit classifier.
//!
//! The rest of the pipeline only knows this trait: hand it a tensor of the
//! declared shape, get back ranked label probabilities. The concrete model is
//! injected at startup and carries no drawing-domain knowledge.

mod mlp;

pub use mlp::{MlpClassifier, ModelLoadError};

use ndarray::Array3;
use thiserror::Error;

/// Input contract expected by the MNIST-style models this app ships with.
pub const MNIST_INPUT: TensorShape = TensorShape {
    height: 28,
    width: 28,
    channels: 1,
};

/// Declared (height, width, channels) input contract of a classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TensorShape {
    /// Rows of the input grid.
    pub height: usize,
    /// Columns of the input grid.
    pub width: usize,
    /// Channels per pixel.
    pub channels: usize,
}

impl TensorShape {
    /// Total element count of a conforming tensor.
    pub const fn element_count(&self) -> usize {
        self.height * self.width * self.channels
    }

    /// True when a tensor has exactly this shape.
    pub fn matches(&self, tensor: &Array3<f32>) -> bool {
        tensor.dim() == (self.height, self.width, self.channels)
    }
}

/// Failures surfaced by the classifier boundary.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// The input tensor does not match the model's declared input contract.
    #[error("Input tensor shape {actual:?} does not match expected {expected:?}")]
    ShapeMismatch {
        /// Shape the model was built for.
        expected: TensorShape,
        /// Dimensions of the tensor actually supplied.
        actual: (usize, usize, usize),
    },
    /// The underlying model could not be loaded or invoked.
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),
}

/// One ranked entry of a classifier's output.
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    /// Class label, e.g. "7".
    pub label: String,
    /// Probability in [0, 1].
    pub confidence: f32,
}

/// Typed gateway to a pre-trained model.
pub trait Classifier: Send + Sync {
    /// Input contract the model was trained for.
    fn input_shape(&self) -> TensorShape;

    /// Run inference, returning predictions ranked by descending confidence.
    ///
    /// The returned list is non-empty on success; ties keep the model's own
    /// class order.
    fn predict(&self, input: &Array3<f32>) -> Result<Vec<Prediction>, ClassifierError>;
}

/// Stand-in injected when no model could be loaded at startup.
///
/// Every prediction surfaces the load failure instead of silently defaulting,
/// so the UI degrades to the unknown sentinel with a visible reason.
#[derive(Clone, Debug)]
pub struct UnavailableClassifier {
    reason: String,
}

impl UnavailableClassifier {
    /// Wrap the reason the real model could not be loaded.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Classifier for UnavailableClassifier {
    fn input_shape(&self) -> TensorShape {
        MNIST_INPUT
    }

    fn predict(&self, _input: &Array3<f32>) -> Result<Vec<Prediction>, ClassifierError> {
        Err(ClassifierError::Unavailable(self.reason.clone()))
    }
}
