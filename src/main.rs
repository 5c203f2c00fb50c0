#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use hack_planner::{logging, Settings};
use tracing::{error, warn};

fn main() -> eframe::Result<()> {
    let (settings, settings_error) = Settings::load_or_default(&Settings::default_path());
    logging::init(&settings.log_filter);
    if let Some(e) = settings_error {
        warn!("using default settings: {}", e);
    }

    // Today is fixed for the whole session.
    let today = chrono::Local::now().date_naive();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([800.0, 420.0])
            .with_title("Hack Planner"),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Hack Planner",
        options,
        Box::new(move |cc| Ok(Box::new(app::PlannerApp::new(cc, &settings, today)?))),
    );
    if let Err(e) = &result {
        error!("planner exited: {}", e);
    }
    result
}
