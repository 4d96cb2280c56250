//! Three-dimensional tile coordinates in a Web Mercator pyramid.
//!
//! # Examples
//!
//! ```
//! use tilecut_core::TileCoord;
//!
//! let coord = TileCoord::new(5, 6, 7).unwrap();
//! assert_eq!(coord.level, 5);
//!
//! // north-west corner of the tile
//! let [lon, lat] = coord.as_geo();
//! assert!(lon < 0.0 && lat > 0.0);
//! ```

use crate::{GeoBBox, MAX_LEVEL, mercator::tile_to_lonlat};
use anyhow::{Result, ensure};
use std::fmt::{self, Debug};

/// A tile coordinate with zoom level, column `x` and row `y`.
///
/// Rows use XYZ orientation (`y = 0` is the northernmost row) unless stated otherwise.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	pub level: u8,
	pub x: u32,
	pub y: u32,
}

impl TileCoord {
	/// # Errors
	/// Returns an error if `level` > 31 or `x`/`y` lie outside the grid of `level`.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		let max = 2u64.pow(u32::from(level));
		ensure!(u64::from(x) < max, "x ({x}) out of bounds for level {level}");
		ensure!(u64::from(y) < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// Geographic position `[lon, lat]` of the tile's north-west corner.
	#[must_use]
	pub fn as_geo(&self) -> [f64; 2] {
		tile_to_lonlat(self.level, f64::from(self.x), f64::from(self.y))
	}

	/// Geographic extent of this tile as `[west, south, east, north]`.
	pub fn to_geo_bbox(&self) -> Result<GeoBBox> {
		let [west, north] = self.as_geo();
		let [east, south] = tile_to_lonlat(self.level, f64::from(self.x) + 1.0, f64::from(self.y) + 1.0);
		GeoBBox::new(west, south, east, north)
	}
}

impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "TileCoord({}, [{}, {}])", self.level, self.x, self.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use pretty_assertions::assert_eq;

	#[test]
	fn new_checks_bounds() {
		assert!(TileCoord::new(3, 7, 7).is_ok());
		assert_eq!(
			TileCoord::new(3, 8, 0).unwrap_err().to_string(),
			"x (8) out of bounds for level 3"
		);
		assert_eq!(
			TileCoord::new(3, 0, 8).unwrap_err().to_string(),
			"y (8) out of bounds for level 3"
		);
		assert_eq!(
			TileCoord::new(32, 0, 0).unwrap_err().to_string(),
			"level (32) must be <= 31"
		);
		assert!(TileCoord::new(31, u32::MAX >> 1, 0).is_ok());
	}

	#[test]
	fn geo_bbox_of_root_tile() -> Result<()> {
		let bbox = TileCoord::new(0, 0, 0)?.to_geo_bbox()?;
		assert_relative_eq!(bbox.x_min, -180.0);
		assert_relative_eq!(bbox.x_max, 180.0);
		assert_relative_eq!(bbox.y_min, -85.051_128_779_806_59, epsilon = 1e-9);
		assert_relative_eq!(bbox.y_max, 85.051_128_779_806_59, epsilon = 1e-9);
		Ok(())
	}

	#[test]
	fn geo_bbox_of_quadrant() -> Result<()> {
		let bbox = TileCoord::new(1, 1, 0)?.to_geo_bbox()?;
		assert_relative_eq!(bbox.x_min, 0.0);
		assert_relative_eq!(bbox.y_min, 0.0);
		assert_relative_eq!(bbox.x_max, 180.0);
		assert_relative_eq!(bbox.y_max, 85.051_128_779_806_59, epsilon = 1e-9);
		Ok(())
	}

	#[test]
	fn debug_format() -> Result<()> {
		assert_eq!(format!("{:?}", TileCoord::new(4, 3, 11)?), "TileCoord(4, [3, 11])");
		Ok(())
	}
}
