mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use app::ChartExplorerApp;

/// Interactive explorer for weekly Spotify Top 50 chart data.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the chart dataset (CSV).
    #[arg(default_value = "cleaned_spotify_dataset.csv")]
    dataset: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    // The whole app is a view over this one table; no dataset, no app.
    let dataset = data::loader::load_dataset(&args.dataset)
        .with_context(|| format!("loading dataset {}", args.dataset.display()))?;
    log::info!(
        "Loaded {} chart entries ({} rows dropped during cleaning)",
        dataset.len(),
        dataset.dropped_rows
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Spotify Top 50 Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(ChartExplorerApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("running ui: {e}"))
}
