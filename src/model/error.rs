use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors (fatal at startup)
// ---------------------------------------------------------------------------

/// Reasons a classifier artifact could not be turned into a usable session.
#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("model artifact not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported model artifact extension: .{0}")]
    UnsupportedFormat(String),

    #[error("failed to initialize ONNX Runtime: {0}")]
    Runtime(String),

    #[error("model artifact {} is corrupt: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    /// The artifact targets a different IR / opset than this runtime supports.
    #[error("model artifact {} was produced for another runtime version: {message}", path.display())]
    VersionMismatch { path: PathBuf, message: String },

    #[error("invalid model artifact: {0}")]
    Invalid(String),

    #[error("artifact label encoding has no positive class id {0}")]
    MissingPositiveClass(i64),
}

impl ArtifactLoadError {
    /// Sort a session-creation failure into skew vs. corruption by the
    /// runtime's message.
    pub fn from_session_failure(path: PathBuf, message: String) -> Self {
        let lower = message.to_ascii_lowercase();
        let skew = ["ir version", "opset", "unsupported model"]
            .iter()
            .any(|needle| lower.contains(needle));
        if skew {
            ArtifactLoadError::VersionMismatch { path, message }
        } else {
            ArtifactLoadError::Corrupt { path, message }
        }
    }
}

// ---------------------------------------------------------------------------
// Inference errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("classifier returned {got} rows for a batch of {expected}")]
    BatchShape { expected: usize, got: usize },

    #[error("probability row has {got} columns, positive class is column {column}")]
    MissingProbability { column: usize, got: usize },

    #[error("classifier failed: {0}")]
    Classifier(String),
}
