//! Game State CLI
//!
//! Loads a tick dataset, enriches it against a zone config and prints query
//! results as JSON.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use gs_core::{load_dataset, load_dataset_as, DatasetFormat, GameStateTable, Side, ZoneConfig};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "gs")]
#[command(about = "Zone occupancy, loadout timer and heatmap queries over player tick data", long_about = None)]
struct Cli {
    /// Tick dataset (.csv, .json, .ndjson)
    #[arg(long)]
    data: PathBuf,

    /// Dataset encoding (csv, json, ndjson); inferred from the extension if omitted
    #[arg(long, value_parser = parse_format)]
    format: Option<DatasetFormat>,

    /// Zone config (.yaml or .json) with the boundary polygon vertices
    #[arg(long)]
    zone: PathBuf,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true, default_value = "false")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct Selection {
    /// Team identifier
    #[arg(long)]
    team: String,

    /// Side: T or CT
    #[arg(long, value_parser = parse_side)]
    side: Side,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Fraction of a team/side's observations inside the zone
    Occupancy {
        #[command(flatten)]
        selection: Selection,
    },

    /// Mean round timer for rows carrying at least N of the given weapon classes
    Timer {
        #[command(flatten)]
        selection: Selection,

        /// Minimum number of the listed classes
        #[arg(long, default_value = "0")]
        min_weapons: usize,

        /// Weapon classes (repeat or comma-separate)
        #[arg(long = "weapon", value_delimiter = ',')]
        weapons: Vec<String>,
    },

    /// 10x10 position density of a team/side's in-zone observations
    Heatmap {
        #[command(flatten)]
        selection: Selection,
    },

    /// Every team/side pair with row and in-zone counts
    Summary,
}

#[cfg(feature = "cli")]
fn parse_side(s: &str) -> std::result::Result<Side, String> {
    Side::parse(s).ok_or_else(|| format!("invalid side '{}': expected T or CT", s))
}

#[cfg(feature = "cli")]
fn parse_format(s: &str) -> std::result::Result<DatasetFormat, String> {
    DatasetFormat::parse(s).ok_or_else(|| format!("invalid format '{}': expected csv, json or ndjson", s))
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data = cli.data;
    let zone_path = cli.zone;

    let zone = ZoneConfig::load(&zone_path)
        .and_then(|cfg| cfg.to_zone())
        .with_context(|| format!("Failed to load zone config: {}", zone_path.display()))?;
    let dataset = match cli.format {
        Some(format) => load_dataset_as(&data, format),
        None => load_dataset(&data),
    }
    .with_context(|| format!("Failed to load dataset: {}", data.display()))?;
    let table = GameStateTable::from_dataset(dataset, zone).context("Failed to enrich dataset")?;
    tracing::info!(rows = table.len(), "table ready");

    let output = match cli.command {
        Commands::Occupancy { selection } => {
            serde_json::to_value(table.team_strategy(&selection.team, selection.side)?)?
        }
        Commands::Timer { selection, min_weapons, weapons } => serde_json::to_value(
            table.weapon_timer_report(&selection.team, selection.side, min_weapons, weapons.as_slice()),
        )?,
        Commands::Heatmap { selection } => {
            serde_json::to_value(table.heatmap_coordinates(&selection.team, selection.side)?)?
        }
        Commands::Summary => serde_json::to_value(table.partitions())?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("gs CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
