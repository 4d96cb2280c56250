use anyhow::Result;
use std::path::{Path, PathBuf};
use tilecut_core::{GeoBBox, ZoomRange};
use tilecut_derive::context;

/// Everything an extraction run needs: which levels, which region, from where, to where.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfig {
	pub zoom: ZoomRange,
	pub region: GeoBBox,
	pub source: PathBuf,
	pub destination: PathBuf,
}

impl ExtractConfig {
	/// Validates zoom levels and region and builds the config.
	///
	/// `region` is `[min_lon, min_lat, max_lon, max_lat]`.
	#[context("invalid extraction parameters")]
	pub fn new(min_zoom: u8, max_zoom: u8, region: [f64; 4], source: &Path, destination: &Path) -> Result<ExtractConfig> {
		Ok(ExtractConfig {
			zoom: ZoomRange::new(min_zoom, max_zoom)?,
			region: GeoBBox::try_from(region)?,
			source: source.to_path_buf(),
			destination: destination.to_path_buf(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use rstest::rstest;

	#[test]
	fn valid() -> Result<()> {
		let config = ExtractConfig::new(
			0,
			2,
			[-0.2, 51.4, 0.1, 51.6],
			Path::new("world.mbtiles"),
			Path::new("london.mbtiles"),
		)?;
		assert_eq!(config.zoom, ZoomRange::new(0, 2)?);
		assert_eq!(config.region.as_array(), [-0.2, 51.4, 0.1, 51.6]);
		assert_eq!(config.destination, PathBuf::from("london.mbtiles"));
		Ok(())
	}

	#[rstest]
	#[case(3, 2, [0.0, 0.0, 1.0, 1.0], "min_zoom (3) must be <= max_zoom (2)")]
	#[case(0, 32, [0.0, 0.0, 1.0, 1.0], "max_zoom (32) must be <= 31")]
	#[case(0, 2, [1.0, 0.0, 0.0, 1.0], "x_min")]
	#[case(0, 2, [0.0, 0.0, 1.0, f64::NAN], "finite")]
	#[case(0, 2, [0.0, -91.0, 1.0, 1.0], "-91")]
	fn invalid(#[case] min: u8, #[case] max: u8, #[case] region: [f64; 4], #[case] cause: &str) {
		let err = ExtractConfig::new(min, max, region, Path::new("a"), Path::new("b")).unwrap_err();
		assert_eq!(err.to_string(), "invalid extraction parameters");
		let chain = format!("{err:?}");
		assert!(chain.contains(cause), "{cause:?} not found in {chain}");
	}
}
