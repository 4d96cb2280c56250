//! Contains types like coordinates, bounding boxes (bboxes) and zoom ranges.

mod geo_bbox;
pub use geo_bbox::*;

pub mod mercator;
pub use mercator::{TilePoint, lonlat_to_tile, tile_to_lonlat};

mod tile_bbox;
pub use tile_bbox::*;

mod tile_coord;
pub use tile_coord::*;

mod zoom_range;
pub use zoom_range::*;

/// Highest supported zoom level. Tile indices at this level still fit into `u32`.
pub const MAX_LEVEL: u8 = 31;
