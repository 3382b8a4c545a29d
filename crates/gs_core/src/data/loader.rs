//! Dataset loader: CSV / JSON / NDJSON → typed rows + column schema.
//!
//! CSV layout: one header row, `inventory` cells hold a JSON array of item
//! objects (empty cell or `null` = no inventory).
//!
//! JSON layout: a top-level array of row objects. NDJSON: one row object per
//! line. The column set is the union of keys over all rows; a key missing on
//! one row is a null cell for that row.
//!
//! Parquet input is not supported; convert to one of the above first.
//!
//! `x`, `y`, `z` are required. Every other column is optional here; whether
//! its absence matters is decided by the enrichment step and the queries.

use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{GameStateError, Result};
use crate::models::{
    InventoryItem, Schema, Side, TickRecord, COL_INVENTORY, COL_SECONDS, COL_SIDE, COL_TEAM,
    COL_X, COL_Y, COL_Z, REQUIRED_COLUMNS,
};

/// Source encodings the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Json,
    NdJson,
}

impl DatasetFormat {
    /// Infer from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::parse(path.extension()?.to_str()?)
    }

    /// Parse a format name (`csv`, `json`, `ndjson`/`jsonl`), case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Some(DatasetFormat::Csv),
            "json" => Some(DatasetFormat::Json),
            "ndjson" | "jsonl" => Some(DatasetFormat::NdJson),
            _ => None,
        }
    }
}

/// Rows plus the column names present in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub schema: Schema,
    pub rows: Vec<TickRecord>,
}

/// Load a dataset, inferring its format from the extension.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let format = DatasetFormat::from_path(path).ok_or_else(|| {
        GameStateError::data_load(path.display().to_string(), "unrecognised file extension")
    })?;
    load_dataset_as(path, format)
}

pub fn load_dataset_as(path: &Path, format: DatasetFormat) -> Result<Dataset> {
    let origin = path.display().to_string();
    let file = File::open(path)
        .map_err(|e| GameStateError::data_load(&origin, format!("cannot open: {}", e)))?;
    let reader = BufReader::new(file);

    let dataset = match format {
        DatasetFormat::Csv => read_csv(reader, &origin)?,
        DatasetFormat::Json => read_json(reader, &origin)?,
        DatasetFormat::NdJson => read_ndjson(reader, &origin)?,
    };
    log::info!(
        "Loaded {} rows from {} ({} columns: {})",
        dataset.rows.len(),
        origin,
        dataset.schema.columns().len(),
        dataset.schema.columns().join(",")
    );
    Ok(dataset)
}

fn check_required(schema: &Schema, origin: &str) -> Result<()> {
    match schema.first_missing(&REQUIRED_COLUMNS) {
        Some(col) => Err(GameStateError::data_load(origin, format!("missing '{}' column", col))),
        None => Ok(()),
    }
}

// ========== CSV ==========

pub fn read_csv<R: Read>(reader: R, origin: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| GameStateError::data_load(origin, format!("cannot read header: {}", e)))?
        .clone();
    // Strip a UTF-8 BOM from the first header.
    let schema = Schema::new(headers.iter().map(|h| h.trim_start_matches('\u{feff}').to_string()));
    check_required(&schema, origin)?;

    let position = |name: &str| schema.columns().iter().position(|c| c == name);
    let (ix, iy, iz) = match (position(COL_X), position(COL_Y), position(COL_Z)) {
        (Some(x), Some(y), Some(z)) => (x, y, z),
        _ => return Err(GameStateError::data_load(origin, "missing positional column")),
    };
    let i_team = position(COL_TEAM);
    let i_side = position(COL_SIDE);
    let i_seconds = position(COL_SECONDS);
    let i_inventory = position(COL_INVENTORY);

    let mut rows = Vec::new();
    for (n, result) in reader.records().enumerate() {
        let line = n + 1;
        let record = result
            .map_err(|e| GameStateError::data_load(origin, format!("row {}: {}", line, e)))?;
        let cell = |i: Option<usize>| i.and_then(|i| record.get(i)).filter(|s| !s.is_empty());

        let mut row = TickRecord::new(
            parse_f64(cell(Some(ix)), COL_X, line, origin)?,
            parse_f64(cell(Some(iy)), COL_Y, line, origin)?,
            parse_f64(cell(Some(iz)), COL_Z, line, origin)?,
        );
        row.team = cell(i_team).map(str::to_string);
        row.side = cell(i_side).map(|s| parse_side(s, line, origin)).transpose()?;
        row.seconds = cell(i_seconds)
            .map(|s| parse_f64(Some(s), COL_SECONDS, line, origin))
            .transpose()?;
        row.inventory = match cell(i_inventory) {
            Some(text) => {
                let value: Value = serde_json::from_str(text).map_err(|e| {
                    GameStateError::data_load(origin, format!("row {}: invalid inventory: {}", line, e))
                })?;
                inventory_from_value(value)
            }
            None => None,
        };
        rows.push(row);
    }

    Ok(Dataset { schema, rows })
}

fn parse_f64(cell: Option<&str>, column: &str, line: usize, origin: &str) -> Result<f64> {
    let text = cell.ok_or_else(|| {
        GameStateError::data_load(origin, format!("row {}: empty '{}' value", line, column))
    })?;
    text.parse::<f64>().map_err(|_| {
        GameStateError::data_load(origin, format!("row {}: invalid '{}' value: '{}'", line, column, text))
    })
}

fn parse_side(text: &str, line: usize, origin: &str) -> Result<Side> {
    Side::parse(text).ok_or_else(|| {
        GameStateError::data_load(origin, format!("row {}: invalid 'side' value: '{}'", line, text))
    })
}

// ========== JSON ==========

pub fn read_json<R: Read>(reader: R, origin: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_reader(reader)
        .map_err(|e| GameStateError::data_load(origin, format!("invalid JSON: {}", e)))?;
    let Value::Array(items) = value else {
        return Err(GameStateError::data_load(origin, "expected a top-level array of rows"));
    };
    let objects = items
        .into_iter()
        .enumerate()
        .map(|(n, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(GameStateError::data_load(origin, format!("row {}: not an object", n + 1))),
        })
        .collect::<Result<Vec<_>>>()?;
    rows_from_objects(objects, origin)
}

pub fn read_ndjson<R: Read>(reader: R, origin: &str) -> Result<Dataset> {
    let mut objects = Vec::new();
    for (n, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|e| GameStateError::data_load(origin, e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(&line) {
            Ok(Value::Object(map)) => objects.push(map),
            Ok(_) => {
                return Err(GameStateError::data_load(origin, format!("line {}: not an object", n + 1)))
            }
            Err(e) => {
                return Err(GameStateError::data_load(origin, format!("line {}: {}", n + 1, e)))
            }
        }
    }
    rows_from_objects(objects, origin)
}

fn rows_from_objects(objects: Vec<Map<String, Value>>, origin: &str) -> Result<Dataset> {
    let schema = Schema::new(objects.iter().flat_map(|o| o.keys().cloned()));
    check_required(&schema, origin)?;

    let mut rows = Vec::with_capacity(objects.len());
    for (n, mut obj) in objects.into_iter().enumerate() {
        let line = n + 1;
        let mut row = TickRecord::new(
            json_f64(obj.get(COL_X), COL_X, line, origin)?,
            json_f64(obj.get(COL_Y), COL_Y, line, origin)?,
            json_f64(obj.get(COL_Z), COL_Z, line, origin)?,
        );
        row.team = match obj.get(COL_TEAM) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };
        row.side = match obj.get(COL_SIDE) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(parse_side(s, line, origin)?),
            Some(other) => return Err(invalid(origin, line, COL_SIDE, other)),
        };
        row.seconds = match obj.get(COL_SECONDS) {
            None | Some(Value::Null) => None,
            some => Some(json_f64(some, COL_SECONDS, line, origin)?),
        };
        row.inventory = obj.remove(COL_INVENTORY).and_then(inventory_from_value);
        rows.push(row);
    }

    Ok(Dataset { schema, rows })
}

fn json_f64(value: Option<&Value>, column: &str, line: usize, origin: &str) -> Result<f64> {
    let Some(value) = value else {
        return Err(GameStateError::data_load(
            origin,
            format!("row {}: missing '{}' value", line, column),
        ));
    };
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| invalid(origin, line, column, value))
}

fn invalid(origin: &str, line: usize, column: &str, value: &Value) -> GameStateError {
    GameStateError::data_load(origin, format!("row {}: invalid '{}' value: {}", line, column, value))
}

/// Null stays null. A non-array inventory cannot be itemised and is
/// treated as null.
fn inventory_from_value(value: Value) -> Option<Vec<InventoryItem>> {
    match value {
        Value::Array(items) => Some(items.into_iter().map(InventoryItem::from_value).collect()),
        Value::Null => None,
        other => {
            log::warn!("Ignoring non-array inventory cell: {}", other);
            None
        }
    }
}
