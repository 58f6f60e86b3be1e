use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui;

use launch_dash::app::LaunchDashApp;
use launch_dash::config::Config;
use launch_dash::data::loader::load_file;
use launch_dash::state::AppState;

/// Dashboard of launch outcomes by site and payload mass.
#[derive(Parser, Debug)]
#[command(name = "launch-dash", version, about)]
struct Cli {
    /// Launch table (.csv, .json or .parquet). Overrides the configured path.
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(path) = cli.data {
        config.data.path = path;
    }
    log::info!("Using launch data at {}", config.data.path.display());

    // The dataset is read once; the dashboard cannot run without it.
    let dataset = load_file(&config.data.path).map_err(|e| {
        log::error!("{e}");
        e
    })?;
    let state = AppState::new(dataset, &config.payload);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Launch Dash – SpaceX Launch Records",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
