//! `SQLite` file `*.mbtiles` as tile container
//!
//! - `MBTilesReader`: reads metadata and tile rows from an existing `MBTiles` database.
//! - `MBTilesWriter`: creates or extends an `MBTiles` database, one transaction per run.
//!
//! Rows are addressed the way they are stored: `tile_row` counts from the south edge
//! (TMS orientation).

mod reader;
mod records;
mod writer;

pub use reader::MBTilesReader;
pub use records::{MetadataEntry, TileRecord};
pub use writer::MBTilesWriter;
