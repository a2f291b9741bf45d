pub mod launch;
pub mod zoom;

pub use launch::{LaunchOptions, LaunchTarget};

use crate::annotation::Annotation;
use crate::record::{load_annotations, ImageRecord};
use crate::settings::ViewerSettings;
use crate::viewer::{AnnotatedViewer, ViewerInput};

use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

pub struct AnnotatorApp {
    pub settings: ViewerSettings,
    pub viewer: AnnotatedViewer,

    /// Record name or image path shown in the top bar and window title
    pub title: String,
    pub title_dirty: bool,

    pub status_message: Option<(String, Instant)>,
}

impl AnnotatorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: ViewerSettings, launch: LaunchOptions) -> Self {
        let viewer = AnnotatedViewer::new(&cc.egui_ctx, &settings);
        let mut app = Self {
            settings,
            viewer,
            title: String::new(),
            title_dirty: true,
            status_message: None,
        };

        match launch.target {
            Some(LaunchTarget::Record(path)) => app.open_record(path),
            Some(LaunchTarget::Image(url)) => {
                let annotations = match launch.annotations.as_deref().map(load_annotations) {
                    Some(Ok(list)) => list,
                    Some(Err(e)) => {
                        log::error!("{}", e);
                        app.set_status_message(e.to_string());
                        Vec::new()
                    }
                    None => Vec::new(),
                };
                app.open_image(url, launch.preview, annotations);
            }
            None => {
                if let Some(path) = app.settings.last_record.clone().filter(|p| p.exists()) {
                    app.open_record(path);
                }
            }
        }

        app
    }

    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    pub fn open_record(&mut self, path: PathBuf) {
        match ImageRecord::from_file(&path) {
            Ok(record) => {
                log::info!(
                    "Opened record {} with {} annotations",
                    path.display(),
                    record.labeling.len()
                );
                self.title = record.title();
                self.title_dirty = true;
                self.viewer.set_input(record.into_viewer_input());
                self.settings.last_record = Some(path);
                self.settings.save();
            }
            Err(e) => {
                log::error!("Failed to open record {}: {}", path.display(), e);
                self.set_status_message(e.user_message());
            }
        }
    }

    pub fn open_image(&mut self, image_url: String, preview_url: Option<String>, annotations: Vec<Annotation>) {
        self.title = image_url.clone();
        self.title_dirty = true;
        self.viewer.set_input(ViewerInput {
            image_url,
            preview_url,
            annotations,
        });
    }

    pub fn open_record_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().add_filter("Image record", &["json"]);
        if let Some(dir) = self.settings.last_record.as_ref().and_then(|p| p.parent()) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.open_record(path);
        }
    }
}
