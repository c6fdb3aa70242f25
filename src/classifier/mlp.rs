//! Single-hidden-layer network over flattened pixel intensities.
//!
//! Weights come from an offline training step and are loaded from a JSON
//! file; the layout is validated once at load time so inference itself never
//! has to re-check lengths.

use std::path::Path;

use ndarray::Array3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Classifier, ClassifierError, Prediction, TensorShape};

/// Errors raised while loading a model weights file.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// The weights file could not be read.
    #[error("Failed to read model file {path}: {source}")]
    Read {
        /// Path that was attempted.
        path: std::path::PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The weights file is not valid JSON for this layout.
    #[error("Failed to parse model weights: {0}")]
    Parse(#[from] serde_json::Error),
    /// The weights are internally inconsistent.
    #[error("Invalid model weights: {0}")]
    Invalid(String),
}

/// ReLU hidden layer + softmax output over a flattened grayscale input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MlpClassifier {
    /// Input rows.
    pub input_height: usize,
    /// Input columns.
    pub input_width: usize,
    /// Ordered class labels; output index i scores `classes[i]`.
    pub classes: Vec<String>,
    /// Hidden layer width.
    pub hidden_size: usize,
    /// Hidden weights, `hidden_size` rows of `input` values.
    pub weights1: Vec<f32>,
    /// Hidden biases.
    pub bias1: Vec<f32>,
    /// Output weights, one row of `hidden_size` values per class.
    pub weights2: Vec<f32>,
    /// Output biases.
    pub bias2: Vec<f32>,
}

impl MlpClassifier {
    /// Parse and validate a model from raw JSON bytes.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        let model: Self = serde_json::from_slice(bytes)?;
        model.validate()?;
        Ok(model)
    }

    /// Load and validate a model from a weights file on disk.
    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let bytes = std::fs::read(path).map_err(|source| ModelLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_bytes(&bytes)
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        let input = self.input_shape().element_count();
        let hidden = self.hidden_size;
        let classes = self.classes.len();
        if input == 0 {
            return Err(ModelLoadError::Invalid("empty input shape".into()));
        }
        if hidden == 0 || classes == 0 {
            return Err(ModelLoadError::Invalid(
                "hidden size and class count must be non-zero".into(),
            ));
        }
        if self.weights1.len() != input * hidden {
            return Err(ModelLoadError::Invalid("weights1 length mismatch".into()));
        }
        if self.bias1.len() != hidden {
            return Err(ModelLoadError::Invalid("bias1 length mismatch".into()));
        }
        if self.weights2.len() != classes * hidden {
            return Err(ModelLoadError::Invalid("weights2 length mismatch".into()));
        }
        if self.bias2.len() != classes {
            return Err(ModelLoadError::Invalid("bias2 length mismatch".into()));
        }
        Ok(())
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        let hidden = self.hidden_size;
        let classes = self.classes.len();

        let mut hidden_act = vec![0.0f32; hidden];
        for h in 0..hidden {
            let mut sum = self.bias1[h];
            let base = h * input.len();
            for (i, value) in input.iter().enumerate() {
                sum += self.weights1[base + i] * value;
            }
            hidden_act[h] = sum.max(0.0);
        }

        let mut logits = vec![0.0f32; classes];
        for c in 0..classes {
            let mut sum = self.bias2[c];
            let base = c * hidden;
            for h in 0..hidden {
                sum += self.weights2[base + h] * hidden_act[h];
            }
            logits[c] = sum;
        }

        softmax(&logits)
    }
}

impl Classifier for MlpClassifier {
    fn input_shape(&self) -> TensorShape {
        TensorShape {
            height: self.input_height,
            width: self.input_width,
            channels: 1,
        }
    }

    fn predict(&self, input: &Array3<f32>) -> Result<Vec<Prediction>, ClassifierError> {
        let expected = self.input_shape();
        if !expected.matches(input) {
            return Err(ClassifierError::ShapeMismatch {
                expected,
                actual: input.dim(),
            });
        }
        let flat: Vec<f32> = input.iter().copied().collect();
        let proba = self.forward(&flat);

        let mut ranked: Vec<Prediction> = self
            .classes
            .iter()
            .zip(proba)
            .map(|(label, confidence)| Prediction {
                label: label.clone(),
                confidence,
            })
            .collect();
        // Stable sort keeps class order for exact ties.
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(ranked)
    }
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    if total <= 0.0 {
        return vec![1.0 / logits.len().max(1) as f32; logits.len()];
    }
    exps.into_iter().map(|e| e / total).collect()
}
