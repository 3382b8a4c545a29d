use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const COL_X: &str = "x";
pub const COL_Y: &str = "y";
pub const COL_Z: &str = "z";
pub const COL_TEAM: &str = "team";
pub const COL_SIDE: &str = "side";
pub const COL_SECONDS: &str = "seconds";
pub const COL_INVENTORY: &str = "inventory";

/// Derived by enrichment, never read from the source.
pub const COL_IN_BOUNDARY: &str = "in_boundary";
pub const COL_WEAPON_CLASSES: &str = "weapon_classes";

/// Columns a dataset must carry to be loaded at all.
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_X, COL_Y, COL_Z];

/// Column names present in a table, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let mut out: Vec<String> = Vec::new();
        for column in columns {
            let column: String = column.into();
            if seen.insert(column.clone()) {
                out.push(column);
            }
        }
        Self { columns: out }
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// First of `columns` not present in this schema.
    pub fn first_missing<'a>(&self, columns: &[&'a str]) -> Option<&'a str> {
        columns.iter().copied().find(|c| !self.contains(c))
    }

    pub fn push(&mut self, column: &str) {
        if !self.contains(column) {
            self.columns.push(column.to_string());
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}
