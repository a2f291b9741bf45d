use super::AnnotatorApp;

impl AnnotatorApp {
    pub fn zoom_in(&mut self) {
        self.viewer.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewer.zoom_out();
    }

    /// Back to 100% with no pan.
    pub fn reset_view(&mut self) {
        self.viewer.reset_view();
    }

    pub fn zoom_percent(&self) -> f32 {
        self.viewer.transform().scale * 100.0
    }
}
