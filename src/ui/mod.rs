mod keyboard_input;
mod statusbar;
mod toolbar;
mod zoom_controls;

use crate::app::AnnotatorApp;
use crate::viewer::loader::LoadStatus;
use egui::{self, Color32, CornerRadius, Rect, Vec2};

impl eframe::App for AnnotatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Finished loads from the worker threads
        self.viewer.poll();

        self.handle_keyboard(ctx);
        self.handle_dropped_files(ctx);

        if self.title_dirty {
            self.title_dirty = false;
            let title = if self.title.is_empty() {
                "annoview".to_string()
            } else {
                format!("{} - annoview", self.title)
            };
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }

        self.render_toolbar(ctx);
        self.render_statusbar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(self.settings.background_color.0))
            .show(ctx, |ui| {
                let response = self.viewer.show(ui);
                self.render_loading_overlay(ui, response.rect);
                self.render_zoom_controls(ui, response.rect);
            });
    }
}

impl AnnotatorApp {
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<_> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        // Only the last drop matters; each one replaces the image
        if let Some(path) = dropped.into_iter().last() {
            let is_record = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            if is_record {
                self.open_record(path);
            } else {
                self.open_image(path.display().to_string(), None, Vec::new());
            }
        }
    }

    /// Loading indicator owned by the surrounding layout, not the viewer.
    fn render_loading_overlay(&self, ui: &mut egui::Ui, rect: Rect) {
        match self.viewer.load_status() {
            LoadStatus::Loading => {
                let spinner_rect = Rect::from_center_size(rect.center(), Vec2::splat(48.0));
                ui.put(spinner_rect, egui::Spinner::new().size(48.0));
            }
            LoadStatus::Preview if self.settings.show_loading_badge => {
                let badge = Rect::from_min_size(
                    rect.left_top() + Vec2::new(60.0, 10.0),
                    Vec2::new(200.0, 30.0),
                );
                ui.painter().rect_filled(
                    badge,
                    CornerRadius::same(6),
                    Color32::from_rgba_unmultiplied(0, 0, 0, 200),
                );
                ui.painter().text(
                    badge.center(),
                    egui::Align2::CENTER_CENTER,
                    "⟳ Loading full resolution...",
                    egui::FontId::proportional(12.0),
                    Color32::from_rgb(200, 200, 200),
                );
            }
            LoadStatus::Idle => {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Drop an image record (.json) or an image here\nor use Ctrl+O to open",
                    egui::FontId::proportional(20.0),
                    Color32::from_rgb(150, 150, 150),
                );
            }
            _ => {}
        }
    }
}
