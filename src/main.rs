mod app;
mod config;
mod model;
mod predictor;
mod state;
mod ui;

use anyhow::Context;
use app::SentimentApp;
use config::AppConfig;
use eframe::egui;
use predictor::Predictor;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    let predictor = Predictor::initialize(&config.model_path).with_context(|| {
        format!(
            "cannot start without a classifier (set {} to override the path)",
            config::MODEL_PATH_ENV
        )
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.inner_size)
            .with_min_inner_size(config.min_inner_size),
        ..Default::default()
    };

    eframe::run_native(
        state::TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(SentimentApp::new(predictor)))),
    )
    .map_err(|e| anyhow::anyhow!("UI exited with an error: {e}"))
}
