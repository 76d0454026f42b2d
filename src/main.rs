mod app;
mod color;
mod data;
mod report;
mod settings;
mod state;
mod ui;

use std::path::PathBuf;

use app::SimplePlotApp;
use eframe::egui;
use settings::Settings;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load();
    let mut app = SimplePlotApp::new(settings);

    // `simple-plot data.csv` opens the file on startup.
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        ui::panels::open_from(&mut app.state, path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SimplePlot",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
