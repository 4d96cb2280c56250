//! Geographic and tile-grid types used by tilecut: bounding boxes, zoom ranges,
//! tile coordinates and the spherical Mercator projection between them.

pub mod types;
pub use types::*;
