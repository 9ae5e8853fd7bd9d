mod app;
mod upload;
mod utils;

use app::ImageUploader;
use eframe::CreationContext;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Image Uploader",
        options,
        Box::new(|cc: &CreationContext| Box::new(ImageUploader::new(cc))),
    )
}
