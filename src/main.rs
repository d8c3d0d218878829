#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod error;
mod io;
mod model;
mod settings;
mod ui;

use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings_path = settings::AppSettings::default_path();
    let settings = settings::AppSettings::load(&settings_path);
    // Write the defaults on first run so users have a file to edit.
    if !settings_path.exists() {
        if let Err(e) = settings.save(&settings_path) {
            tracing::warn!(path = ?settings_path, error = %e, "could not write default settings");
        }
    }
    tracing::info!(path = ?settings_path, zoom = ?settings.zoom, "settings loaded");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Roadmap Timeline"),
        ..Default::default()
    };

    eframe::run_native(
        "Roadmap Timeline",
        options,
        Box::new(|cc| Ok(Box::new(app::RoadmapApp::new(cc, settings)))),
    )
}
