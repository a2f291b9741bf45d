use crate::app::AnnotatorApp;
use egui::{self, Color32, CornerRadius, Rect, RichText, Vec2};

const BUTTON_SIZE: f32 = 36.0;
const BUTTON_GAP: f32 = 10.0;
const BUTTON_FILL: Color32 = Color32::from_rgb(0x83, 0xD2, 0xFF);

impl AnnotatorApp {
    /// Zoom in / zoom out buttons stacked at the left edge, 45% down.
    pub(crate) fn render_zoom_controls(&mut self, ui: &mut egui::Ui, rect: Rect) {
        let top = rect.top() + rect.height() * 0.45;
        let left = rect.left() + 10.0;

        let plus = Rect::from_min_size(egui::pos2(left, top), Vec2::splat(BUTTON_SIZE));
        let minus = plus.translate(Vec2::new(0.0, BUTTON_SIZE + BUTTON_GAP));

        if ui.put(plus, zoom_button("+")).on_hover_text("Zoom in").clicked() {
            self.zoom_in();
        }
        if ui.put(minus, zoom_button("−")).on_hover_text("Zoom out").clicked() {
            self.zoom_out();
        }
    }
}

fn zoom_button(label: &str) -> egui::Button<'static> {
    egui::Button::new(RichText::new(label.to_string()).size(20.0).color(Color32::BLACK))
        .fill(BUTTON_FILL)
        .corner_radius(CornerRadius::same(6))
}
