//! Enriched telemetry table.
//!
//! Construction loads the rows, then runs two enrichment passes exactly once
//! and in this order:
//!
//! 1. `filter_rows_in_boundary` - adds `in_boundary` (zone containment)
//! 2. `extract_weapon_classes` - adds `weapon_classes` (loadout classes)
//!
//! After that the table is read-only. Every query borrows it immutably, so a
//! `GameStateTable` can be shared across threads without locking.

use std::path::Path;

use crate::analysis::index::PartitionIndex;
use crate::data::{load_dataset, Dataset};
use crate::error::{GameStateError, Result};
use crate::geometry::ZoneOfInterest;
use crate::models::{
    extract_classes, Schema, Side, TickRecord, COL_INVENTORY, COL_IN_BOUNDARY, COL_WEAPON_CLASSES,
};

/// Loaded rows plus the two derived columns, stored column-wise next to the
/// source rows (index `i` of each vector belongs to `rows[i]`).
#[derive(Debug, Clone)]
pub struct GameStateTable {
    schema: Schema,
    zone: ZoneOfInterest,
    rows: Vec<TickRecord>,
    in_boundary: Vec<bool>,
    weapon_classes: Vec<Vec<String>>,
    index: PartitionIndex,
}

impl GameStateTable {
    /// Load `path` and enrich it against the polygon given by `vertices`.
    pub fn open(path: &Path, vertices: Vec<(f64, f64)>) -> Result<Self> {
        let zone = ZoneOfInterest::from_vertices(vertices)?;
        let dataset = load_dataset(path)?;
        Self::from_dataset(dataset, zone)
    }

    /// Enrich an already loaded dataset.
    pub fn from_dataset(dataset: Dataset, zone: ZoneOfInterest) -> Result<Self> {
        let Dataset { schema, rows } = dataset;
        let index = PartitionIndex::build(&rows);
        let mut table = Self {
            schema,
            zone,
            rows,
            in_boundary: Vec::new(),
            weapon_classes: Vec::new(),
            index,
        };
        table.filter_rows_in_boundary();
        table.extract_weapon_classes()?;
        Ok(table)
    }

    /// Compute `in_boundary` for every row. No row is dropped.
    fn filter_rows_in_boundary(&mut self) {
        let zone = &self.zone;
        self.in_boundary = self.rows.iter().map(|r| zone.contains(r.x, r.y, r.z)).collect();
        self.schema.push(COL_IN_BOUNDARY);

        log::debug!(
            "in_boundary: {}/{} rows inside zone",
            self.in_boundary.iter().filter(|b| **b).count(),
            self.rows.len()
        );
    }

    /// Compute `weapon_classes` for every row.
    ///
    /// Fails only when the source has no `inventory` column at all.
    fn extract_weapon_classes(&mut self) -> Result<()> {
        if !self.schema.contains(COL_INVENTORY) {
            return Err(GameStateError::MissingColumn(COL_INVENTORY.to_string()));
        }
        self.weapon_classes =
            self.rows.iter().map(|r| extract_classes(r.inventory.as_deref())).collect();
        self.schema.push(COL_WEAPON_CLASSES);

        log::debug!(
            "weapon_classes: {}/{} rows with an empty loadout",
            self.weapon_classes.iter().filter(|c| c.is_empty()).count(),
            self.rows.len()
        );
        Ok(())
    }

    // ========== Accessors ==========

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn zone(&self) -> &ZoneOfInterest {
        &self.zone
    }

    pub fn rows(&self) -> &[TickRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn in_boundary(&self, row: usize) -> Option<bool> {
        self.in_boundary.get(row).copied()
    }

    pub fn weapon_classes(&self, row: usize) -> Option<&[String]> {
        self.weapon_classes.get(row).map(Vec::as_slice)
    }

    pub(crate) fn in_boundary_column(&self) -> &[bool] {
        &self.in_boundary
    }

    pub(crate) fn weapon_classes_column(&self) -> &[Vec<String>] {
        &self.weapon_classes
    }

    /// Row indices for (team, side) in table order.
    pub(crate) fn partition(&self, team: &str, side: Side) -> &[usize] {
        self.index.rows(team, side)
    }

    pub(crate) fn index(&self) -> &PartitionIndex {
        &self.index
    }
}
