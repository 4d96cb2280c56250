//! Inclusive rectangles of tile indices at a single zoom level.
//!
//! A [`TileBBox`] is what a geographic region becomes once it is projected onto the tile
//! grid of one level. Rows are in XYZ orientation after [`TileBBox::from_geo`]; call
//! [`TileBBox::flip_y`] to switch to the TMS rows stored in MBTiles.
//!
//! ```
//! use tilecut_core::{GeoBBox, TileBBox};
//!
//! let london = GeoBBox::new(-0.2, 51.4, 0.1, 51.6).unwrap();
//! let mut bbox = TileBBox::from_geo(2, &london).unwrap();
//! assert_eq!(format!("{bbox:?}"), "2: [1,1,2,1] (2)");
//!
//! bbox.flip_y();
//! assert_eq!(format!("{bbox:?}"), "2: [1,2,2,2] (2)");
//! ```

use crate::{GeoBBox, MAX_LEVEL, mercator::lonlat_to_tile};
use anyhow::{Result, ensure};
use std::fmt::{self, Debug};
use tilecut_derive::context;

/// Distance in degrees by which region edges are moved inward before projecting, so that
/// an edge lying exactly on a tile border does not pull in the neighbouring tile.
const EDGE_NUDGE: f64 = 1e-10;

/// An inclusive rectangle `[x_min, x_max] × [y_min, y_max]` of tiles at `level`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileBBox {
	level: u8,
	x_min: u32,
	y_min: u32,
	x_max: u32,
	y_max: u32,
}

impl TileBBox {
	/// Builds a bbox from its inclusive corners.
	///
	/// # Errors
	/// Returns an error if `level` is too high, a minimum exceeds its maximum, or a
	/// maximum lies outside the grid.
	pub fn from_min_and_max(level: u8, x_min: u32, y_min: u32, x_max: u32, y_max: u32) -> Result<TileBBox> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		ensure!(x_min <= x_max, "x_min ({x_min}) must be <= x_max ({x_max})");
		ensure!(y_min <= y_max, "y_min ({y_min}) must be <= y_max ({y_max})");
		let max = Self::max_index(level);
		ensure!(x_max <= max, "x_max ({x_max}) must be <= {max}");
		ensure!(y_max <= max, "y_max ({y_max}) must be <= {max}");
		Ok(TileBBox {
			level,
			x_min,
			y_min,
			x_max,
			y_max,
		})
	}

	/// The whole grid of `level`.
	pub fn new_full(level: u8) -> Result<TileBBox> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		let max = Self::max_index(level);
		TileBBox::from_min_and_max(level, 0, 0, max, max)
	}

	/// Projects a geographic region onto the grid of `level`.
	///
	/// The region is clamped to the Mercator latitude limits, its north-west and south-east
	/// corners are projected, floored, and clamped to the grid. Edges are nudged inward by
	/// a tiny amount, so the tiles only touched by the region's border are not included:
	/// the bounds of a single tile map back to exactly that tile.
	///
	/// Rows of the result are in XYZ orientation.
	#[context("projecting {bbox:?} onto level {level}")]
	pub fn from_geo(level: u8, bbox: &GeoBBox) -> Result<TileBBox> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");

		let bbox = bbox.limited_to_mercator();
		let nudge_x = EDGE_NUDGE.min((bbox.x_max - bbox.x_min) / 2.0);
		let nudge_y = EDGE_NUDGE.min((bbox.y_max - bbox.y_min) / 2.0);

		let north_west = lonlat_to_tile(level, bbox.x_min + nudge_x, bbox.y_max - nudge_y);
		let south_east = lonlat_to_tile(level, bbox.x_max - nudge_x, bbox.y_min + nudge_y);

		let max = i64::from(Self::max_index(level));
		let clamp = |v: i64| v.clamp(0, max) as u32;
		let (x0, y0) = north_west.floor();
		let (x1, y1) = south_east.floor();

		let tile_bbox = TileBBox::from_min_and_max(level, clamp(x0), clamp(y0), clamp(x1), clamp(y1))?;
		log::trace!("projected {bbox:?} to {tile_bbox:?}");
		Ok(tile_bbox)
	}

	/// Highest tile index at `level`: `2^level - 1`.
	pub fn max_index(level: u8) -> u32 {
		(1u64 << level).saturating_sub(1) as u32
	}

	pub fn level(&self) -> u8 {
		self.level
	}

	pub fn x_min(&self) -> u32 {
		self.x_min
	}

	pub fn y_min(&self) -> u32 {
		self.y_min
	}

	pub fn x_max(&self) -> u32 {
		self.x_max
	}

	pub fn y_max(&self) -> u32 {
		self.y_max
	}

	pub fn width(&self) -> u32 {
		self.x_max - self.x_min + 1
	}

	pub fn height(&self) -> u32 {
		self.y_max - self.y_min + 1
	}

	/// Number of tiles covered.
	pub fn count_tiles(&self) -> u64 {
		u64::from(self.width()) * u64::from(self.height())
	}

	/// Switches rows between XYZ and TMS orientation.
	pub fn flip_y(&mut self) {
		let max = Self::max_index(self.level);
		(self.y_min, self.y_max) = (max - self.y_max, max - self.y_min);
	}

	/// Non-mutating version of [`flip_y`](Self::flip_y).
	#[must_use]
	pub fn flipped_y(mut self) -> TileBBox {
		self.flip_y();
		self
	}
}

impl Debug for TileBBox {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}: [{},{},{},{}] ({})",
			self.level,
			self.x_min,
			self.y_min,
			self.x_max,
			self.y_max,
			self.count_tiles()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::TileCoord;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	fn london() -> GeoBBox {
		GeoBBox::new(-0.2, 51.4, 0.1, 51.6).unwrap()
	}

	#[rstest]
	#[case(0, [0, 0, 0, 0])]
	#[case(1, [0, 0, 1, 0])]
	#[case(2, [1, 1, 2, 1])]
	#[case(10, [511, 340, 512, 340])]
	fn london_rectangles(#[case] level: u8, #[case] expected: [u32; 4]) -> Result<()> {
		let bbox = TileBBox::from_geo(level, &london())?;
		assert_eq!([bbox.x_min(), bbox.y_min(), bbox.x_max(), bbox.y_max()], expected);
		Ok(())
	}

	#[rstest]
	#[case(0, 0, 0)]
	#[case(1, 0, 0)]
	#[case(1, 1, 1)]
	#[case(2, 3, 0)]
	#[case(5, 31, 31)]
	#[case(10, 511, 340)]
	#[case(16, 32_750, 21_790)]
	#[case(20, 524_287, 348_000)]
	fn tile_bounds_map_back_to_the_tile(#[case] level: u8, #[case] x: u32, #[case] y: u32) -> Result<()> {
		let coord = TileCoord::new(level, x, y)?;
		let bbox = TileBBox::from_geo(level, &coord.to_geo_bbox()?)?;
		assert_eq!(bbox, TileBBox::from_min_and_max(level, x, y, x, y)?);
		assert_eq!(bbox.count_tiles(), 1);
		Ok(())
	}

	#[test]
	fn whole_world_is_the_full_grid() -> Result<()> {
		let world = GeoBBox::new(-180.0, -90.0, 180.0, 90.0)?;
		for level in 0..=12 {
			assert_eq!(TileBBox::from_geo(level, &world)?, TileBBox::new_full(level)?);
		}
		Ok(())
	}

	#[test]
	fn point_on_tile_border_selects_one_tile() -> Result<()> {
		let point = GeoBBox::new(0.0, 0.0, 0.0, 0.0)?;
		let bbox = TileBBox::from_geo(1, &point)?;
		assert_eq!(bbox, TileBBox::from_min_and_max(1, 1, 1, 1, 1)?);
		Ok(())
	}

	#[test]
	fn polar_region_is_clamped() -> Result<()> {
		let arctic = GeoBBox::new(-10.0, 86.0, 10.0, 90.0)?;
		let bbox = TileBBox::from_geo(3, &arctic)?;
		assert_eq!(bbox, TileBBox::from_min_and_max(3, 3, 0, 4, 0)?);
		Ok(())
	}

	#[test]
	fn flip_y() -> Result<()> {
		let mut bbox = TileBBox::from_min_and_max(3, 1, 0, 4, 2)?;
		bbox.flip_y();
		assert_eq!(bbox, TileBBox::from_min_and_max(3, 1, 5, 4, 7)?);
		assert_eq!(bbox.flipped_y(), TileBBox::from_min_and_max(3, 1, 0, 4, 2)?);

		let mut root = TileBBox::new_full(0)?;
		root.flip_y();
		assert_eq!(root, TileBBox::new_full(0)?);
		Ok(())
	}

	#[test]
	fn flip_matches_flipped_tile_point() -> Result<()> {
		let center = lonlat_to_tile(9, -0.1, 51.5);
		let tms = TileBBox::from_geo(9, &GeoBBox::new(-0.1, 51.5, -0.1, 51.5)?)?.flipped_y();
		let (x, y) = center.flipped().floor();
		assert_eq!((i64::from(tms.x_min()), i64::from(tms.y_min())), (x, y));
		Ok(())
	}

	#[test]
	fn sizes() -> Result<()> {
		let bbox = TileBBox::from_min_and_max(4, 2, 3, 5, 6)?;
		assert_eq!((bbox.width(), bbox.height(), bbox.count_tiles()), (4, 4, 16));
		assert_eq!(TileBBox::new_full(31)?.count_tiles(), 1u64 << 62);
		Ok(())
	}

	#[rstest]
	#[case(3, 2, 0, 1, 0, "x_min (2) must be <= x_max (1)")]
	#[case(3, 0, 2, 0, 1, "y_min (2) must be <= y_max (1)")]
	#[case(3, 0, 0, 8, 0, "x_max (8) must be <= 7")]
	#[case(3, 0, 0, 0, 8, "y_max (8) must be <= 7")]
	#[case(32, 0, 0, 0, 0, "level (32) must be <= 31")]
	fn invalid(
		#[case] level: u8,
		#[case] x0: u32,
		#[case] y0: u32,
		#[case] x1: u32,
		#[case] y1: u32,
		#[case] message: &str,
	) {
		let err = TileBBox::from_min_and_max(level, x0, y0, x1, y1).unwrap_err();
		assert_eq!(err.to_string(), message);
	}

	#[test]
	fn debug_format() -> Result<()> {
		let bbox = TileBBox::from_min_and_max(4, 2, 3, 5, 6)?;
		assert_eq!(format!("{bbox:?}"), "4: [2,3,5,6] (16)");
		Ok(())
	}
}
