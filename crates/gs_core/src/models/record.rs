//! Per-tick player observation and its loadout.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Attacking (T) or defending (CT) role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    T,
    CT,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::T => "T",
            Side::CT => "CT",
        }
    }

    /// Parse a side label. Accepts the short codes and the long role names,
    /// case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "T" | "TERRORIST" => Some(Side::T),
            "CT" | "COUNTERTERRORIST" | "COUNTER-TERRORIST" => Some(Side::CT),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One loadout entry. `class` is `None` when the item has no `class` key
/// (or is not an object at all); every other key is kept in `attributes`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryItem {
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl InventoryItem {
    pub fn with_class(class: impl Into<String>) -> Self {
        Self { class: Some(class.into()), attributes: Map::new() }
    }

    /// Lenient conversion from a raw JSON value. Never fails.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut map) => {
                let class = map.remove("class").map(|v| match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                });
                Self { class, attributes: map }
            }
            _ => Self::default(),
        }
    }
}

/// One row of the table: a single player observed at a single tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub team: Option<String>,
    pub side: Option<Side>,
    /// Elapsed round timer in seconds.
    pub seconds: Option<f64>,
    pub inventory: Option<Vec<InventoryItem>>,
}

impl TickRecord {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, team: None, side: None, seconds: None, inventory: None }
    }

    pub fn with_team(mut self, team: impl Into<String>, side: Side) -> Self {
        self.team = Some(team.into());
        self.side = Some(side);
        self
    }

    pub fn with_seconds(mut self, seconds: f64) -> Self {
        self.seconds = Some(seconds);
        self
    }

    pub fn with_inventory(mut self, items: Vec<InventoryItem>) -> Self {
        self.inventory = Some(items);
        self
    }
}

/// Weapon classes carried in `inventory`.
///
/// A null inventory yields an empty list. If any item lacks a class the
/// whole row yields an empty list, not the classes of the other items.
pub fn extract_classes(inventory: Option<&[InventoryItem]>) -> Vec<String> {
    let Some(items) = inventory else {
        return Vec::new();
    };
    items
        .iter()
        .map(|item| item.class.clone())
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}
