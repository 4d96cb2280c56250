//! Spherical (Web) Mercator projection between geographic coordinates and the tile grid.
//!
//! At zoom level `z` the grid has `n = 2^z` columns and rows. Geographic points map to
//! fractional grid positions:
//!
//! - `x = (lon + 180) / 360 * n`
//! - `y = (1 - asinh(tan(lat)) / π) / 2 * n`
//!
//! with `y = 0` at the north edge (XYZ orientation). MBTiles archives number rows from
//! the south edge instead (TMS orientation); [`TilePoint::flipped`] switches between the two.
//!
//! The fractional flip is `n - y`, not `n - y - 1`: the extra `- 1` belongs to the integer
//! flip of tile indices (`2^z - 1 - y`, see [`TileBBox::flip_y`](crate::TileBBox::flip_y)).
//! Applied before flooring it shifts every row by one, so a tile's own bounds would no
//! longer map back to that tile.
//!
//! No range checks happen here: latitudes close to ±90° land far outside the grid.
//! Callers clamp their input first, e.g. with [`GeoBBox::limit_to_mercator`](crate::GeoBBox::limit_to_mercator).
//!
//! ```
//! use tilecut_core::mercator::{lonlat_to_tile, tile_to_lonlat};
//!
//! let point = lonlat_to_tile(2, -0.1, 51.5);
//! assert_eq!(point.floor(), (1, 1));
//!
//! let [lon, lat] = tile_to_lonlat(1, 1.0, 1.0);
//! assert_eq!((lon, lat), (0.0, 0.0));
//! ```

use std::f64::consts::PI;

/// A fractional position on the tile grid of one zoom level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePoint {
	pub level: u8,
	pub x: f64,
	pub y: f64,
}

impl TilePoint {
	/// Mirrors the row axis: `y' = n - y`.
	///
	/// Flooring a flipped point gives the row of the containing tile counted from the
	/// opposite edge, i.e. XYZ rows become TMS rows and vice versa.
	#[must_use]
	pub fn flipped(&self) -> TilePoint {
		TilePoint {
			level: self.level,
			x: self.x,
			y: level_size(self.level) - self.y,
		}
	}

	/// Integer column and row of the tile containing this point.
	pub fn floor(&self) -> (i64, i64) {
		(self.x.floor() as i64, self.y.floor() as i64)
	}
}

/// Number of tiles along one axis at `level`, as `f64`.
pub fn level_size(level: u8) -> f64 {
	2.0f64.powi(i32::from(level))
}

/// Projects `lon`/`lat` (degrees) onto the tile grid of `level`.
pub fn lonlat_to_tile(level: u8, lon: f64, lat: f64) -> TilePoint {
	let n = level_size(level);
	let x = (lon + 180.0) / 360.0 * n;
	let y = (1.0 - lat.to_radians().tan().asinh() / PI) / 2.0 * n;
	TilePoint { level, x, y }
}

/// Inverse of [`lonlat_to_tile`]: returns `[lon, lat]` in degrees of the grid position `x`/`y`.
pub fn tile_to_lonlat(level: u8, x: f64, y: f64) -> [f64; 2] {
	let n = level_size(level);
	let lon = x / n * 360.0 - 180.0;
	let lat = (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
	[lon, lat]
}
