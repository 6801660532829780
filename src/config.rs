use std::path::PathBuf;

/// Where the artifact lives unless overridden.
pub const DEFAULT_MODEL_PATH: &str = "../models/sentiment_classifier.onnx";

/// Environment variable overriding [`DEFAULT_MODEL_PATH`] for installs that
/// keep the model outside `../models`.
pub const MODEL_PATH_ENV: &str = "SENTIMENT_MODEL_PATH";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup settings, resolved once in `main`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            inner_size: [800.0, 720.0],
            min_inner_size: [480.0, 400.0],
        }
    }
}

impl AppConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read overrides through `lookup` (key → value).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup(MODEL_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            config.model_path = PathBuf::from(path);
        }
        config
    }
}
