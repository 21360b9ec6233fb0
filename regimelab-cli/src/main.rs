//! RegimeLab CLI — generate synthetic conduct-regime training data.
//!
//! Commands:
//! - `simulate` — simulate one panel and write it as Parquet plus a
//!   `meta.json` sidecar carrying the content-addressed run id
//! - `dataset` — full pipeline: for each stress-test mode, simulate a
//!   panel, cut windows at each requested length, engineer features, and
//!   write one Parquet per (mode, length)

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use regimelab_core::config::{Mode, SimulationConfig};
use regimelab_core::features::{engineer_features, FeatureConfig};
use regimelab_core::sim::PanelRequest;
use regimelab_core::windows::{make_windows, WindowColumns, WindowSet};

#[derive(Parser)]
#[command(name = "regimelab", about = "RegimeLab CLI — conduct-regime panel generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one panel and write the long-format series as Parquet.
    Simulate {
        /// Path to a TOML experiment config. Defaults apply if omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the number of markets.
        #[arg(long)]
        n_markets: Option<usize>,

        /// Override the panel seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Override the stress-test mode (baseline, kappa_only, beta_only).
        #[arg(long)]
        mode: Option<String>,

        /// Output Parquet path.
        #[arg(long, default_value = "data/panel.parquet")]
        out: PathBuf,
    },
    /// Run the full pipeline and write one feature table per (mode, length).
    Dataset {
        /// Path to a TOML experiment config. Defaults apply if omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory for series and window/feature tables.
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,
    },
}

/// TOML experiment file. Every section is optional; omissions fall back
/// to the Tier-0 defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct ExperimentFile {
    n_markets: usize,
    seed: u64,
    modes: Vec<Mode>,
    window_lengths: Vec<usize>,
    simulation: SimulationConfig,
    features: FeatureConfig,
}

impl Default for ExperimentFile {
    fn default() -> Self {
        Self {
            n_markets: 200,
            seed: 0,
            modes: vec![Mode::Baseline],
            window_lengths: vec![18, 24, 36],
            simulation: SimulationConfig::default(),
            features: FeatureConfig::default(),
        }
    }
}

/// Metadata sidecar written next to each panel artifact.
#[derive(Debug, Serialize)]
struct PanelMeta {
    run_id: String,
    n_markets: usize,
    seed: u64,
    mode: String,
    rows: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Simulate {
            config,
            n_markets,
            seed,
            mode,
            out,
        } => cmd_simulate(config.as_deref(), n_markets, seed, mode.as_deref(), &out),
        Commands::Dataset { config, out_dir } => cmd_dataset(config.as_deref(), &out_dir),
    }
}

fn load_experiment(path: Option<&Path>) -> Result<ExperimentFile> {
    let Some(path) = path else {
        return Ok(ExperimentFile::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

fn cmd_simulate(
    config: Option<&Path>,
    n_markets: Option<usize>,
    seed: Option<u64>,
    mode: Option<&str>,
    out: &Path,
) -> Result<()> {
    let experiment = load_experiment(config)?;
    let mode = match mode {
        Some(s) => Mode::from_str(s)?,
        None => experiment.modes.first().copied().unwrap_or_default(),
    };

    let request = PanelRequest {
        config: experiment.simulation.clone(),
        n_markets: n_markets.unwrap_or(experiment.n_markets),
        seed: seed.unwrap_or(experiment.seed),
        mode,
    };

    let panel = request.simulate()?;
    let mut df = panel.to_dataframe()?;
    write_parquet(&mut df, out)?;

    let meta = PanelMeta {
        run_id: request.run_id(),
        n_markets: request.n_markets,
        seed: request.seed,
        mode: request.mode.to_string(),
        rows: df.height(),
    };
    let meta_path = out.with_extension("meta.json");
    fs::write(&meta_path, serde_json::to_string_pretty(&meta)?)
        .with_context(|| format!("failed to write {}", meta_path.display()))?;

    println!(
        "Saved: {}  rows={}  run_id={}",
        out.display(),
        df.height(),
        meta.run_id
    );
    Ok(())
}

fn cmd_dataset(config: Option<&Path>, out_dir: &Path) -> Result<()> {
    let experiment = load_experiment(config)?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let columns = WindowColumns::default();

    for &mode in &experiment.modes {
        let request = PanelRequest {
            config: experiment.simulation.clone(),
            n_markets: experiment.n_markets,
            seed: experiment.seed,
            mode,
        };
        let panel = request.simulate()?;
        let mut series_df = panel.to_dataframe()?;

        let series_path = out_dir.join(format!("series_{mode}.parquet"));
        write_parquet(&mut series_df, &series_path)?;
        println!("Saved: {}  rows={}", series_path.display(), series_df.height());

        for &window in &experiment.window_lengths {
            let set = make_windows(&series_df, window, &columns)?;
            report_skipped(&set, mode, window);

            let features = engineer_features(&set, &experiment.features);
            let mut df = features.to_dataframe()?;

            let path = out_dir.join(format!("windows_{mode}_L{window}.parquet"));
            write_parquet(&mut df, &path)?;
            println!("Saved: {}  rows={}", path.display(), df.height());
        }
    }
    Ok(())
}

fn report_skipped(set: &WindowSet, mode: Mode, window: usize) {
    for skip in &set.skipped {
        eprintln!(
            "warning: mode={mode} L={window}: skipped market {} window at t={}: {}",
            skip.market_id, skip.window_start, skip.reason
        );
    }
}

fn write_parquet(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    ParquetWriter::new(file)
        .finish(df)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
