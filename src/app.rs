use eframe::egui;

use crate::predictor::Predictor;
use crate::state::{view, PageState};
use crate::ui::page;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SentimentApp {
    /// Loaded once at startup and reused for every prediction.
    predictor: Predictor,
    pub state: PageState,
}

impl SentimentApp {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            state: PageState::default(),
        }
    }
}

impl eframe::App for SentimentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let widgets = view(&self.state);

        let events = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| page::render(ui, &widgets))
                    .inner
            })
            .inner;

        if events.is_empty() {
            return;
        }
        for event in events {
            if let Err(e) = self.state.apply(event, &self.predictor) {
                log::error!("Prediction failed: {e:#}");
                self.state.record_failure(&e);
            }
        }
        ctx.request_repaint();
    }
}
