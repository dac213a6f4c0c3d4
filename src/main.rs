use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use rocket_scope::state::AppState;
use rocket_scope::{analyze, app, load_csv, Config};

/// Analyse an oscilloscope capture from the propulsion test rig.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Scope CSV with "Time (s)" and "Ch1 (V)" columns.
    #[arg(default_value = "rocket-data/first-rocket.csv")]
    csv: PathBuf,

    /// JSON file overriding rig constants and peak thresholds.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Skip the chart window.
    #[arg(long)]
    no_plot: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    log::debug!("Using configuration {config:?}");

    let waveform = load_csv(&cli.csv)?;
    let report = analyze(&waveform, &config)
        .with_context(|| format!("analysing {}", cli.csv.display()))?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    if cli.no_plot {
        return Ok(());
    }

    let mut state = AppState::new(config);
    state.set_analysis(waveform, report);
    app::run(state).map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}
