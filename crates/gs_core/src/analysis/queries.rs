//! Read-only queries over an enriched [`GameStateTable`].
//!
//! Every query selects one (team, side) partition through the partition
//! index, never mutates the table, and returns the same answer on every call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::heatmap::{HeatmapGrid, HEATMAP_BINS};
use super::outcome::{NoDataReason, QueryOutcome};
use crate::error::{GameStateError, Result};
use crate::models::{Side, COL_SECONDS, COL_SIDE, COL_TEAM, COL_WEAPON_CLASSES};
use crate::state::GameStateTable;

/// Detail behind [`GameStateTable::average_timer_with_weapons`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponTimerReport {
    /// Mean `seconds` over the selected rows.
    pub mean_seconds: f64,
    /// Threshold requested by the caller.
    pub requested_min_weapons: usize,
    /// Threshold actually applied after relaxation.
    pub applied_min_weapons: usize,
    /// Rows that met the applied threshold.
    pub rows: usize,
}

/// Row and zone counts for one (team, side) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionSummary {
    pub team: String,
    pub side: Side,
    pub rows: usize,
    pub in_zone: usize,
}

impl PartitionSummary {
    pub fn occupancy(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.in_zone as f64 / self.rows as f64
        }
    }
}

impl GameStateTable {
    fn require_team_side(&self) -> Result<()> {
        match self.schema().first_missing(&[COL_TEAM, COL_SIDE]) {
            Some(col) => Err(GameStateError::MissingColumn(col.to_string())),
            None => Ok(()),
        }
    }

    /// Fraction of the (team, side) observations inside the zone.
    ///
    /// `NoData` when the pair has no rows; a pair that never enters the zone
    /// yields `Value(0.0)`.
    pub fn team_strategy(&self, team: &str, side: Side) -> Result<QueryOutcome<f64>> {
        self.require_team_side()?;
        let rows = self.partition(team, side);
        if rows.is_empty() {
            return Ok(QueryOutcome::NoData(NoDataReason::TeamSide));
        }
        let in_boundary = self.in_boundary_column();
        let inside = rows.iter().filter(|&&i| in_boundary[i]).count();
        Ok(QueryOutcome::Value(inside as f64 / rows.len() as f64))
    }

    /// Mean round timer of (team, side) rows carrying at least `min_weapons`
    /// of `weapon_types`.
    ///
    /// Each requested type counts once per row no matter how many matching
    /// items the row holds. When no row meets the threshold it is lowered one
    /// step at a time, down to 0, until some row does. Missing columns and
    /// other failures come back as `QueryOutcome::Error`.
    pub fn average_timer_with_weapons<S: AsRef<str>>(
        &self,
        team: &str,
        side: Side,
        min_weapons: usize,
        weapon_types: &[S],
    ) -> QueryOutcome<f64> {
        self.weapon_timer_report(team, side, min_weapons, weapon_types)
            .map(|report| report.mean_seconds)
    }

    /// [`average_timer_with_weapons`](Self::average_timer_with_weapons) with
    /// the applied threshold and row count.
    pub fn weapon_timer_report<S: AsRef<str>>(
        &self,
        team: &str,
        side: Side,
        min_weapons: usize,
        weapon_types: &[S],
    ) -> QueryOutcome<WeaponTimerReport> {
        if let Some(col) =
            self.schema().first_missing(&[COL_TEAM, COL_SIDE, COL_WEAPON_CLASSES, COL_SECONDS])
        {
            return QueryOutcome::missing_column(col);
        }

        let requested: BTreeSet<&str> = weapon_types.iter().map(|w| w.as_ref()).collect();
        let classes = self.weapon_classes_column();
        let counted: Vec<(usize, usize)> = self
            .partition(team, side)
            .iter()
            .map(|&i| {
                let n = requested.iter().filter(|w| classes[i].iter().any(|c| c == *w)).count();
                (i, n)
            })
            .collect();

        let mut threshold = min_weapons;
        let mut selected: Vec<usize> = select(&counted, threshold);
        while selected.is_empty() && threshold > 0 {
            threshold -= 1;
            log::debug!(
                "No {}/{} rows with >= {} of {:?}; relaxing to {}",
                team,
                side,
                threshold + 1,
                requested,
                threshold
            );
            selected = select(&counted, threshold);
        }
        if selected.is_empty() {
            return QueryOutcome::NoData(NoDataReason::Conditions);
        }

        let rows = self.rows();
        let timers: Vec<f64> = selected
            .iter()
            .filter_map(|&i| rows[i].seconds)
            .filter(|s| s.is_finite())
            .collect();
        // No NaN mean: an all-null timer selection is reported, not averaged.
        if timers.is_empty() {
            return QueryOutcome::unexpected(format!(
                "no '{}' values among {} selected rows",
                COL_SECONDS,
                selected.len()
            ));
        }

        QueryOutcome::Value(WeaponTimerReport {
            mean_seconds: timers.iter().sum::<f64>() / timers.len() as f64,
            requested_min_weapons: min_weapons,
            applied_min_weapons: threshold,
            rows: selected.len(),
        })
    }

    /// 10 x 10 position density of the (team, side) rows inside the zone.
    pub fn heatmap_coordinates(&self, team: &str, side: Side) -> Result<QueryOutcome<HeatmapGrid>> {
        self.require_team_side()?;
        let rows = self.rows();
        let in_boundary = self.in_boundary_column();
        let points = self
            .partition(team, side)
            .iter()
            .filter(|&&i| in_boundary[i])
            .map(|&i| (rows[i].x, rows[i].y));

        Ok(match HeatmapGrid::from_points(points, HEATMAP_BINS) {
            Some(grid) => QueryOutcome::Value(grid),
            None => QueryOutcome::NoData(NoDataReason::TeamSide),
        })
    }

    /// Every (team, side) pair in first-seen order.
    pub fn partitions(&self) -> Vec<PartitionSummary> {
        let in_boundary = self.in_boundary_column();
        self.index()
            .keys()
            .iter()
            .map(|(team, side)| {
                let rows = self.partition(team, *side);
                PartitionSummary {
                    team: team.clone(),
                    side: *side,
                    rows: rows.len(),
                    in_zone: rows.iter().filter(|&&i| in_boundary[i]).count(),
                }
            })
            .collect()
    }
}

fn select(counted: &[(usize, usize)], threshold: usize) -> Vec<usize> {
    counted.iter().filter(|(_, n)| *n >= threshold).map(|(i, _)| *i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Dataset;
    use crate::geometry::ZoneOfInterest;
    use crate::models::{InventoryItem, Schema, TickRecord};

    const ALL_COLUMNS: [&str; 7] = ["x", "y", "z", "team", "side", "seconds", "inventory"];

    fn zone() -> ZoneOfInterest {
        ZoneOfInterest::from_vertices(vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)])
            .unwrap()
    }

    fn table_with(columns: &[&str], rows: Vec<TickRecord>) -> GameStateTable {
        let ds = Dataset { schema: Schema::new(columns.iter().copied()), rows };
        GameStateTable::from_dataset(ds, zone()).unwrap()
    }

    fn table(rows: Vec<TickRecord>) -> GameStateTable {
        table_with(&ALL_COLUMNS, rows)
    }

    fn loadout(classes: &[&str]) -> Vec<InventoryItem> {
        classes.iter().map(|c| InventoryItem::with_class(*c)).collect()
    }

    fn tick(x: f64, y: f64, z: f64, team: &str, side: Side) -> TickRecord {
        TickRecord::new(x, y, z).with_team(team, side)
    }

    // ========== team_strategy ==========

    #[test]
    fn test_team_strategy_fraction() {
        let t = table(vec![
            tick(50.0, 50.0, 300.0, "Team2", Side::T),
            tick(50.0, 50.0, 100.0, "Team2", Side::T),
            tick(50.0, 50.0, 300.0, "Team2", Side::T),
            tick(500.0, 50.0, 300.0, "Team2", Side::T),
            tick(50.0, 50.0, 300.0, "Team1", Side::T),
        ]);
        assert_eq!(t.team_strategy("Team2", Side::T).unwrap(), QueryOutcome::Value(0.5));
    }

    #[test]
    fn test_team_strategy_all_inside_is_one() {
        let t = table(vec![
            tick(10.0, 10.0, 285.0, "Team2", Side::CT),
            tick(90.0, 90.0, 421.0, "Team2", Side::CT),
        ]);
        assert_eq!(t.team_strategy("Team2", Side::CT).unwrap(), QueryOutcome::Value(1.0));
    }

    #[test]
    fn test_team_strategy_no_rows_is_sentinel_not_zero() {
        let t = table(vec![tick(500.0, 50.0, 300.0, "Team2", Side::T)]);
        assert_eq!(
            t.team_strategy("Team2", Side::CT).unwrap(),
            QueryOutcome::NoData(NoDataReason::TeamSide)
        );
        assert_eq!(t.team_strategy("Team2", Side::T).unwrap(), QueryOutcome::Value(0.0));
    }

    #[test]
    fn test_team_strategy_missing_side_column() {
        let t = table_with(&["x", "y", "z", "team", "inventory"], vec![]);
        let err = t.team_strategy("Team2", Side::T).unwrap_err();
        assert!(matches!(err, GameStateError::MissingColumn(c) if c == "side"));
    }

    // ========== average_timer_with_weapons ==========

    fn armed(team: &str, side: Side, seconds: f64, classes: &[&str]) -> TickRecord {
        tick(50.0, 50.0, 300.0, team, side).with_seconds(seconds).with_inventory(loadout(classes))
    }

    #[test]
    fn test_timer_relaxes_to_best_available() {
        let t = table(vec![
            armed("Team2", Side::T, 10.0, &["Rifle", "SMG", "Pistols"]),
            armed("Team2", Side::T, 20.0, &["Rifle", "Pistols"]),
            armed("Team2", Side::T, 30.0, &["Pistols"]),
        ]);
        let report = t.weapon_timer_report("Team2", Side::T, 3, &["Rifle", "SMG"]).value().unwrap();
        assert_eq!(report.applied_min_weapons, 2);
        assert_eq!(report.rows, 1);
        assert_eq!(report.mean_seconds, 10.0);
        assert_eq!(
            t.average_timer_with_weapons("Team2", Side::T, 3, &["Rifle", "SMG"]),
            QueryOutcome::Value(10.0)
        );
    }

    #[test]
    fn test_timer_threshold_met_without_relaxing() {
        let t = table(vec![
            armed("Team2", Side::T, 10.0, &["Rifle", "SMG"]),
            armed("Team2", Side::T, 20.0, &["Rifle"]),
            armed("Team2", Side::T, 90.0, &["Pistols"]),
        ]);
        let report = t.weapon_timer_report("Team2", Side::T, 1, &["Rifle", "SMG"]).value().unwrap();
        assert_eq!(report.applied_min_weapons, 1);
        assert_eq!(report.mean_seconds, 15.0);
    }

    #[test]
    fn test_timer_multiplicity_ignored() {
        let t = table(vec![
            armed("Team2", Side::T, 10.0, &["Rifle", "Rifle", "Rifle"]),
            armed("Team2", Side::T, 40.0, &["Rifle", "SMG"]),
        ]);
        assert_eq!(
            t.average_timer_with_weapons("Team2", Side::T, 2, &["Rifle", "SMG"]),
            QueryOutcome::Value(40.0)
        );
        // Repeating a requested type does not count it twice.
        assert_eq!(
            t.average_timer_with_weapons("Team2", Side::T, 2, &["Rifle", "Rifle"]),
            QueryOutcome::Value(25.0)
        );
    }

    #[test]
    fn test_timer_relaxes_to_zero() {
        let t = table(vec![
            armed("Team2", Side::T, 10.0, &["Pistols"]),
            armed("Team2", Side::T, 30.0, &[]),
        ]);
        let report = t.weapon_timer_report("Team2", Side::T, 2, &["Rifle"]).value().unwrap();
        assert_eq!(report.applied_min_weapons, 0);
        assert_eq!(report.mean_seconds, 20.0);
    }

    #[test]
    fn test_timer_no_rows_is_sentinel() {
        let t = table(vec![armed("Team2", Side::T, 10.0, &["Rifle"])]);
        assert_eq!(
            t.average_timer_with_weapons("Team1", Side::CT, 0, &["Rifle"]),
            QueryOutcome::NoData(NoDataReason::Conditions)
        );
        let none: [&str; 0] = [];
        assert!(t.average_timer_with_weapons("Team1", Side::CT, 5, &none).is_no_data());
    }

    #[test]
    fn test_timer_missing_column_is_soft_error() {
        let t = table_with(
            &["x", "y", "z", "side", "seconds", "inventory"],
            vec![TickRecord::new(1.0, 1.0, 300.0)],
        );
        assert_eq!(
            t.average_timer_with_weapons("Team2", Side::T, 1, &["Rifle"]),
            QueryOutcome::Error("Error: 'team' not found in data".to_string())
        );

        let t = table_with(&["x", "y", "z", "team", "side", "inventory"], vec![]);
        assert_eq!(
            t.average_timer_with_weapons("Team2", Side::T, 1, &["Rifle"]),
            QueryOutcome::Error("Error: 'seconds' not found in data".to_string())
        );
    }

    #[test]
    fn test_timer_without_timer_values_is_unexpected_error() {
        let t = table(vec![tick(50.0, 50.0, 300.0, "Team2", Side::T).with_inventory(loadout(&["Rifle"]))]);
        match t.average_timer_with_weapons("Team2", Side::T, 1, &["Rifle"]) {
            QueryOutcome::Error(msg) => assert!(msg.starts_with("Unexpected error:")),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_timer_skips_null_timer_cells() {
        let t = table(vec![
            tick(50.0, 50.0, 300.0, "Team2", Side::T).with_inventory(loadout(&["Rifle"])),
            tick(50.0, 50.0, 300.0, "Team2", Side::T)
                .with_inventory(loadout(&["Rifle"]))
                .with_seconds(12.0),
        ]);
        let report = t.weapon_timer_report("Team2", Side::T, 1, &["Rifle"]).value().unwrap();
        assert_eq!(report.mean_seconds, 12.0);
        assert_eq!(report.rows, 2);
    }

    // ========== heatmap_coordinates ==========

    #[test]
    fn test_heatmap_only_counts_zone_rows() {
        let t = table(vec![
            tick(10.0, 10.0, 300.0, "Team2", Side::T),
            tick(90.0, 90.0, 300.0, "Team2", Side::T),
            tick(50.0, 50.0, 300.0, "Team2", Side::T),
            tick(50.0, 50.0, 500.0, "Team2", Side::T),
            tick(150.0, 50.0, 300.0, "Team2", Side::T),
            tick(50.0, 50.0, 300.0, "Team1", Side::T),
        ]);
        let grid = t.heatmap_coordinates("Team2", Side::T).unwrap().value().unwrap();
        assert_eq!(grid.total(), 3);
        assert_eq!(grid.shape(), (HEATMAP_BINS, HEATMAP_BINS));
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(9, 9), 1);
        assert_eq!(grid.x_edges().edges()[10], 90.0);
    }

    #[test]
    fn test_heatmap_nothing_in_zone_is_sentinel() {
        let t = table(vec![tick(150.0, 50.0, 300.0, "Team2", Side::T)]);
        assert_eq!(
            t.heatmap_coordinates("Team2", Side::T).unwrap(),
            QueryOutcome::NoData(NoDataReason::TeamSide)
        );
    }

    // ========== partitions ==========

    #[test]
    fn test_partitions_summary() {
        let t = table(vec![
            tick(50.0, 50.0, 300.0, "Team2", Side::T),
            tick(150.0, 50.0, 300.0, "Team2", Side::T),
            tick(50.0, 50.0, 300.0, "Team1", Side::CT),
        ]);
        let parts = t.partitions();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].team, "Team2");
        assert_eq!(parts[0].rows, 2);
        assert_eq!(parts[0].in_zone, 1);
        assert_eq!(parts[0].occupancy(), 0.5);
        assert_eq!(parts[1].side, Side::CT);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let t = table(vec![
            armed("Team2", Side::T, 10.0, &["Rifle"]),
            armed("Team2", Side::T, 30.0, &["SMG"]),
        ]);
        let first = t.average_timer_with_weapons("Team2", Side::T, 1, &["Rifle"]);
        let second = t.average_timer_with_weapons("Team2", Side::T, 1, &["Rifle"]);
        assert_eq!(first, second);
        assert_eq!(
            t.team_strategy("Team2", Side::T).unwrap(),
            t.team_strategy("Team2", Side::T).unwrap()
        );
    }
}
