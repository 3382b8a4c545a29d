//! # gs_core - Player Telemetry Zone Analytics
//!
//! Loads per-tick player observations from a tactical team game, enriches
//! every row with zone containment and loadout classes, and answers
//! read-only queries over the result.
//!
//! ## Features
//! - Boundary-exclusive point-in-polygon test with a fixed z slab
//! - Loadout class extraction that never fails per row
//! - Occupancy rate, loadout-conditioned round timer, 10 x 10 position density
//! - CSV / JSON / NDJSON datasets, YAML or JSON zone configs
//!
//! ```no_run
//! use gs_core::{GameStateTable, Side};
//! use std::path::Path;
//!
//! let table = GameStateTable::open(
//!     Path::new("round_ticks.csv"),
//!     vec![(-1735.0, 250.0), (-2024.0, 398.0), (-2806.0, 742.0), (-2472.0, 1233.0), (-1565.0, 580.0)],
//! )?;
//! let occupancy = table.team_strategy("Team2", Side::T)?;
//! let timer = table.average_timer_with_weapons("Team2", Side::T, 2, &["Rifle", "SMG"]);
//! println!("{occupancy} / {timer}");
//! # Ok::<(), gs_core::GameStateError>(())
//! ```

pub mod analysis;
pub mod data;
pub mod error;
pub mod geometry;
pub mod models;
pub mod state;

pub use analysis::{
    HeatmapGrid, NoDataReason, PartitionSummary, QueryOutcome, WeaponTimerReport, HEATMAP_BINS,
};
pub use data::{load_dataset, load_dataset_as, Dataset, DatasetFormat, ZoneConfig};
pub use error::{GameStateError, Result};
pub use geometry::{BoundaryPolygon, ZoneOfInterest, Z_MAX, Z_MIN};
pub use models::{InventoryItem, Side, TickRecord};
pub use state::GameStateTable;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
