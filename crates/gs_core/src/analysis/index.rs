//! (team, side) → row indices, built in one pass at construction.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

use crate::models::{Side, TickRecord};

#[derive(Debug, Clone, Default)]
pub struct PartitionIndex {
    /// Keys in first-seen order.
    keys: Vec<(String, Side)>,
    rows: FxHashMap<(String, Side), Vec<usize>>,
}

impl PartitionIndex {
    /// Rows with a null team or side belong to no partition.
    pub fn build(rows: &[TickRecord]) -> Self {
        let mut index = Self::default();
        for (i, row) in rows.iter().enumerate() {
            let (Some(team), Some(side)) = (row.team.as_ref(), row.side) else {
                continue;
            };
            let bucket = match index.rows.entry((team.clone(), side)) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => {
                    index.keys.push(e.key().clone());
                    e.insert(Vec::new())
                }
            };
            bucket.push(i);
        }
        index
    }

    pub fn rows(&self, team: &str, side: Side) -> &[usize] {
        self.rows
            .get(&(team.to_string(), side))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn keys(&self) -> &[(String, Side)] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_groups_in_first_seen_order() {
        let rows = vec![
            TickRecord::new(0.0, 0.0, 0.0).with_team("Team2", Side::T),
            TickRecord::new(0.0, 0.0, 0.0).with_team("Team1", Side::CT),
            TickRecord::new(0.0, 0.0, 0.0),
            TickRecord::new(0.0, 0.0, 0.0).with_team("Team2", Side::T),
        ];
        let index = PartitionIndex::build(&rows);

        assert_eq!(index.len(), 2);
        assert_eq!(index.keys()[0], ("Team2".to_string(), Side::T));
        assert_eq!(index.rows("Team2", Side::T), &[0, 3]);
        assert_eq!(index.rows("Team1", Side::CT), &[1]);
        assert!(index.rows("Team1", Side::T).is_empty());
    }
}
