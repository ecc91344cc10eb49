mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::StartupsDashboardApp;
use config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match DashboardConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid config, using defaults: {e:#}");
            DashboardConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Startups Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(StartupsDashboardApp::new(&config)))),
    )
}
