use annoview::app::{AnnotatorApp, LaunchOptions};
use annoview::logging;
use annoview::settings::ViewerSettings;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    let launch = LaunchOptions::from_env()?;
    logging::init_tracing(launch.debug);

    let settings = ViewerSettings::load();
    let (width, height) = settings.window_size;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("annoview")
            .with_inner_size([width, height])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "annoview",
        native_options,
        Box::new(move |cc| Ok(Box::new(AnnotatorApp::new(cc, settings, launch)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the viewer window: {}", e))
}
