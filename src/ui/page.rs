use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{PageEvent, Widget};

const SUCCESS_FILL: Color32 = Color32::from_rgb(33, 94, 57);
const ERROR_FILL: Color32 = Color32::from_rgb(115, 36, 36);
const INFO_FILL: Color32 = Color32::from_rgb(30, 64, 110);

// ---------------------------------------------------------------------------
// Page rendering
// ---------------------------------------------------------------------------

/// Draw the widgets in order and collect what the user did with them.
/// Events are applied by the caller after the frame.
pub fn render(ui: &mut Ui, widgets: &[Widget]) -> Vec<PageEvent> {
    let mut events = Vec::new();

    for widget in widgets {
        match widget {
            Widget::Title(text) => {
                ui.label(RichText::new(*text).size(28.0).strong());
            }
            Widget::Subheader(text) => {
                ui.label(RichText::new(*text).size(18.0));
            }
            Widget::Paragraph(text) => {
                ui.label(*text);
            }
            Widget::TextArea { label, value } => {
                ui.label(*label);
                let mut text = value.clone();
                let response = ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .desired_width(f32::INFINITY)
                        .desired_rows(8),
                );
                if response.changed() {
                    events.push(PageEvent::TextEdited(text));
                }
            }
            Widget::Button(label) => {
                if ui.button(*label).clicked() {
                    events.push(PageEvent::PredictPressed);
                }
            }
            Widget::Checkbox { label, checked } => {
                let mut value = *checked;
                if ui.checkbox(&mut value, *label).changed() {
                    events.push(PageEvent::SeeScoreToggled(value));
                }
            }
            Widget::Success(text) => banner(ui, SUCCESS_FILL, text),
            Widget::Error(text) => banner(ui, ERROR_FILL, text),
            Widget::Info(text) => banner(ui, INFO_FILL, text),
            Widget::Progress(percent) => {
                ui.add(egui::ProgressBar::new(f32::from(*percent) / 100.0));
            }
            Widget::Failure(msg) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
        }
        ui.add_space(6.0);
    }

    events
}

fn banner(ui: &mut Ui, fill: Color32, text: &str) {
    egui::Frame::default()
        .fill(fill)
        .inner_margin(8.0)
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).color(Color32::WHITE));
        });
}
