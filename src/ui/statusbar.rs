use crate::app::AnnotatorApp;
use crate::viewer::loader::LoadStatus;
use egui::{self, Color32, Margin, RichText};
use std::time::Duration;

const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(4);

impl AnnotatorApp {
    pub(crate) fn render_statusbar(&mut self, ctx: &egui::Context) {
        if self
            .status_message
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() > STATUS_MESSAGE_TTL)
        {
            self.status_message = None;
        }

        egui::TopBottomPanel::bottom("statusbar")
            .frame(
                egui::Frame::NONE
                    .fill(Color32::from_rgb(25, 25, 28))
                    .inner_margin(Margin::symmetric(12, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(size) = self.viewer.active_size() {
                        ui.label(
                            RichText::new(format!("{}×{}", size.x as u32, size.y as u32))
                                .color(Color32::GRAY)
                                .size(11.0),
                        );
                    }

                    let (state, color) = match self.viewer.load_status() {
                        LoadStatus::Idle => ("", Color32::GRAY),
                        LoadStatus::Loading => ("Loading…", Color32::GRAY),
                        LoadStatus::Preview => ("[Preview]", Color32::from_rgb(255, 200, 100)),
                        LoadStatus::Ready => ("", Color32::GRAY),
                        LoadStatus::Failed(_) => ("Load failed", Color32::from_rgb(255, 100, 100)),
                    };
                    if !state.is_empty() {
                        ui.label(RichText::new(state).color(color).size(11.0));
                    }

                    let count = self.viewer.annotations().len();
                    ui.label(
                        RichText::new(format!("{} boxes", count))
                            .color(Color32::GRAY)
                            .size(11.0),
                    );

                    if let Some(hover) = self.viewer.hover() {
                        ui.label(
                            RichText::new(hover.annotation.tooltip_text())
                                .color(Color32::WHITE)
                                .size(11.0),
                        );
                    }

                    if let Some((msg, _)) = &self.status_message {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(RichText::new(msg).color(Color32::from_rgb(255, 200, 100)).size(11.0));
                        });
                    }
                });
            });

        if self.status_message.is_some() {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}
