mod app;
mod ui;

use anyhow::{anyhow, Result};
use app::EnergyDashboardApp;
use clap::Parser;
use eframe::egui;
use energy_dashboard::config::{Args, Config};
use energy_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_args(Args::parse());

    // Load before the window opens; a failure is shown in the UI instead.
    let mut state = AppState::default();
    state.load_path(&config.data_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Energy Analysis Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(EnergyDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}
