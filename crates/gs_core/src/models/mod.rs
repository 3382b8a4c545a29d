pub mod record;
pub mod schema;

pub use record::{extract_classes, InventoryItem, Side, TickRecord};
pub use schema::{
    Schema, COL_INVENTORY, COL_IN_BOUNDARY, COL_SECONDS, COL_SIDE, COL_TEAM, COL_WEAPON_CLASSES,
    COL_X, COL_Y, COL_Z, REQUIRED_COLUMNS,
};
