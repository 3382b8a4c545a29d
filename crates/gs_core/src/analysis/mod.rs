//! Query layer: occupancy, loadout-conditioned timer, and position density.

pub mod heatmap;
pub mod index;
pub mod outcome;
pub mod queries;

pub use heatmap::{BinEdges, HeatmapGrid, HEATMAP_BINS};
pub use index::PartitionIndex;
pub use outcome::{NoDataReason, QueryOutcome, NO_DATA_CONDITIONS, NO_DATA_TEAM_SIDE};
pub use queries::{PartitionSummary, WeaponTimerReport};
