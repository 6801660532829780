//! Model layer: ONNX runtime setup, artifact loading, and inference.
//!
//! Architecture:
//! ```text
//!  sentiment_classifier.onnx   (exported text pipeline:
//!        │                     vectorizer + estimator in one graph)
//!        ▼
//!   ┌──────────┐
//!   │ runtime   │  ONNX Runtime environment + session builder
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ OnnxClassifier│  string tensor in → label / probability tensors out
//!   └──────────────┘
//! ```

pub mod error;
pub mod onnx;
pub mod runtime;

pub use error::{ArtifactLoadError, InferenceError};
pub use onnx::OnnxClassifier;

// ---------------------------------------------------------------------------
// Classifier – the two operations the predictor relies on
// ---------------------------------------------------------------------------

/// A fitted text classifier answering batch queries.
///
/// `Send + Sync` so one loaded instance can be shared read-only.
pub trait Classifier: Send + Sync {
    /// Label encoding: `predict_proba` column `i` is the probability of `classes()[i]`.
    fn classes(&self) -> &[i64];

    /// Discrete class id per document.
    fn predict(&self, batch: &[&str]) -> Result<Vec<i64>, InferenceError>;

    /// Class-membership probabilities per document.
    fn predict_proba(&self, batch: &[&str]) -> Result<Vec<Vec<f64>>, InferenceError>;
}
