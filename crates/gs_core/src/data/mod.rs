//! Dataset and configuration loading.

pub mod loader;
pub mod zone_config;

pub use loader::{load_dataset, load_dataset_as, read_csv, read_json, read_ndjson, Dataset, DatasetFormat};
pub use zone_config::ZoneConfig;
