use std::sync::OnceLock;

use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;

use super::error::ArtifactLoadError;

static INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Session settings. Inference is one short string at a time, so a single
/// intra-op thread is the default.
#[derive(Debug)]
pub struct RuntimeConfig {
    pub intra_threads: usize,
    pub optimization_level: GraphOptimizationLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            intra_threads: 1,
            optimization_level: GraphOptimizationLevel::Level3,
        }
    }
}

fn init_onnx_environment() -> ort::Result<()> {
    ort::init().with_name("sentiment-panel").commit()?;
    Ok(())
}

/// Commit the process-wide ONNX Runtime environment once.
pub fn ensure_initialized() -> Result<(), ArtifactLoadError> {
    INIT.get_or_init(|| init_onnx_environment().map_err(|e| e.to_string()))
        .clone()
        .map_err(ArtifactLoadError::Runtime)
}

pub fn create_session_builder(config: RuntimeConfig) -> Result<SessionBuilder, ArtifactLoadError> {
    ensure_initialized()?;
    let runtime = |e: ort::Error| ArtifactLoadError::Runtime(e.to_string());

    let mut builder = Session::builder().map_err(runtime)?;
    if config.intra_threads > 0 {
        builder = builder
            .with_intra_threads(config.intra_threads)
            .map_err(runtime)?;
    }
    builder
        .with_optimization_level(config.optimization_level)
        .map_err(runtime)
}
