use crate::MAX_LEVEL;
use anyhow::{Result, ensure};
use std::{
	fmt::{self, Display},
	ops::RangeInclusive,
};

/// An inclusive range of zoom levels `[min, max]`.
///
/// ```
/// use tilecut_core::ZoomRange;
///
/// let zoom = ZoomRange::new(3, 5).unwrap();
/// assert_eq!(zoom.iter().collect::<Vec<u8>>(), vec![3, 4, 5]);
/// assert!(ZoomRange::new(5, 3).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoomRange {
	min: u8,
	max: u8,
}

impl ZoomRange {
	/// # Errors
	/// Returns an error if `min > max` or `max` exceeds the highest supported level.
	pub fn new(min: u8, max: u8) -> Result<ZoomRange> {
		ensure!(min <= max, "min_zoom ({min}) must be <= max_zoom ({max})");
		ensure!(max <= MAX_LEVEL, "max_zoom ({max}) must be <= {MAX_LEVEL}");
		Ok(ZoomRange { min, max })
	}

	pub fn min(&self) -> u8 {
		self.min
	}

	pub fn max(&self) -> u8 {
		self.max
	}

	/// All levels from `min` to `max`, ascending.
	pub fn iter(&self) -> RangeInclusive<u8> {
		self.min..=self.max
	}
}

impl Display for ZoomRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}..={}", self.min, self.max)
	}
}
