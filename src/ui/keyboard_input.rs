use crate::app::AnnotatorApp;

impl AnnotatorApp {
    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        // Text fields keep their keys
        if ctx.wants_keyboard_input() {
            return;
        }

        let (zoom_in, zoom_out, reset, open) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                i.key_pressed(egui::Key::Minus),
                i.key_pressed(egui::Key::Num0),
                i.modifiers.command && i.key_pressed(egui::Key::O),
            )
        });

        if zoom_in {
            self.zoom_in();
        }
        if zoom_out {
            self.zoom_out();
        }
        if reset {
            self.reset_view();
        }
        if open {
            self.open_record_dialog();
        }
    }
}
