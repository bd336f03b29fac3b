mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use app::DashboardApp;
use eframe::egui;

/// Dataset read at startup, relative to the working directory.
const DEFAULT_DATASET: &str = "spacex_launch_geo.csv";

fn main() -> Result<()> {
    env_logger::init();

    // A missing or malformed dataset is fatal: there is nothing to show.
    let dataset = data::loader::load_file(Path::new(DEFAULT_DATASET))
        .with_context(|| format!("loading {DEFAULT_DATASET}"))
        .inspect_err(|e| log::error!("{e:#}"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(dataset)))),
    )
    .map_err(|e| anyhow!("running dashboard: {e}"))
}
