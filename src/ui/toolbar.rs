use crate::app::AnnotatorApp;
use egui::{self, Color32, Margin, RichText};

impl AnnotatorApp {
    pub fn render_toolbar(&mut self, ctx: &egui::Context) {
        // Collect actions to perform after UI
        let mut open_record = false;
        let mut zoom_in = false;
        let mut zoom_out = false;
        let mut reset_view = false;

        egui::TopBottomPanel::top("toolbar")
            .frame(
                egui::Frame::NONE
                    .fill(Color32::from_rgb(30, 30, 34))
                    .inner_margin(Margin::symmetric(12, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui
                        .button("Open record…")
                        .on_hover_text("Open an image record (Ctrl+O)")
                        .clicked()
                    {
                        open_record = true;
                    }

                    ui.separator();

                    let title = if self.title.is_empty() { "No image" } else { self.title.as_str() };
                    ui.label(RichText::new(title).color(Color32::WHITE).strong());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("1:1").on_hover_text("Reset view (0)").clicked() {
                            reset_view = true;
                        }
                        if ui.button("+").on_hover_text("Zoom in (+)").clicked() {
                            zoom_in = true;
                        }
                        ui.label(
                            RichText::new(format!("{:.0}%", self.zoom_percent()))
                                .color(Color32::GRAY)
                                .monospace(),
                        );
                        if ui.button("−").on_hover_text("Zoom out (-)").clicked() {
                            zoom_out = true;
                        }
                    });
                });
            });

        if open_record {
            self.open_record_dialog();
        }
        if zoom_in {
            self.zoom_in();
        }
        if zoom_out {
            self.zoom_out();
        }
        if reset_view {
            self.reset_view();
        }
    }
}
