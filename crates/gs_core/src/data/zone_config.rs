//! Zone-of-interest configuration (YAML or JSON).
//!
//! ```yaml
//! name: bombsite-approach
//! vertices:
//!   - [-1735, 250]
//!   - [-2024, 398]
//!   - [-2806, 742]
//! ```
//!
//! Only the footprint is configurable; the z slab is fixed.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GameStateError, Result};
use crate::geometry::ZoneOfInterest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub vertices: Vec<[f64; 2]>,
}

impl ZoneConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from disk; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            GameStateError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    pub fn vertex_pairs(&self) -> Vec<(f64, f64)> {
        self.vertices.iter().map(|[x, y]| (*x, *y)).collect()
    }

    pub fn to_zone(&self) -> Result<ZoneOfInterest> {
        ZoneOfInterest::from_vertices(self.vertex_pairs())
    }
}
