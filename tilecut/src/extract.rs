//! Copy the tiles of a region and a zoom range from one MBTiles file into another.
//!
//! ```rust,no_run
//! use tilecut::{config::ExtractConfig, extract};
//! use std::path::Path;
//!
//! let config = ExtractConfig::new(
//!     0,
//!     2,
//!     [-0.2, 51.4, 0.1, 51.6],
//!     Path::new("world.mbtiles"),
//!     Path::new("london.mbtiles"),
//! )
//! .unwrap();
//! let summary = extract::run(&config).unwrap();
//! println!("{} tiles copied", summary.total());
//! ```

use crate::{
	config::ExtractConfig,
	mbtiles::{MBTilesReader, MBTilesWriter},
};
use anyhow::{Result, ensure};
use std::path::Path;
use tilecut_core::TileBBox;
use tilecut_derive::context;

/// Number of tiles copied at one zoom level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelReport {
	pub level: u8,
	pub count: u64,
}

/// Per-level results of an extraction, in ascending level order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractSummary {
	levels: Vec<LevelReport>,
}

impl ExtractSummary {
	pub fn levels(&self) -> &[LevelReport] {
		&self.levels
	}

	pub fn total(&self) -> u64 {
		self.levels.iter().map(|l| l.count).sum()
	}

	/// Lowest level that yielded at least one tile.
	pub fn level_min(&self) -> Option<u8> {
		self.levels.iter().find(|l| l.count > 0).map(|l| l.level)
	}

	/// Highest level that yielded at least one tile.
	pub fn level_max(&self) -> Option<u8> {
		self.levels.iter().rev().find(|l| l.count > 0).map(|l| l.level)
	}
}

/// Opens both files, extracts, and commits the destination.
///
/// Progress is written to stdout: one line per zoom level, then a completion message.
///
/// # Errors
/// Fails if source and destination are the same file, if either store cannot be opened,
/// or if any read or write fails. Nothing is committed in that case.
#[context("extracting tiles from '{}' into '{}'", config.source.display(), config.destination.display())]
pub fn run(config: &ExtractConfig) -> Result<ExtractSummary> {
	ensure!(
		!same_file(&config.source, &config.destination),
		"source and destination must be different files"
	);

	let reader = MBTilesReader::open_path(&config.source)?;
	let mut writer = MBTilesWriter::open_path(&config.destination)?;

	let summary = extract_tiles(&reader, &mut writer, config)?;
	writer.finish()?;

	log::info!(
		"copied {} tiles at levels {} from {} to {}",
		summary.total(),
		config.zoom,
		reader.name(),
		config.destination.display()
	);
	println!("Tiles have been extracted from the source and added to the destination MBTiles file.");

	Ok(summary)
}

/// Copies all metadata and every tile of `config.region` at the levels of `config.zoom`.
///
/// Afterwards `minzoom` and `maxzoom` are set to the lowest and highest level that yielded
/// a tile. If no tile was copied, they keep whatever value the copied metadata carried.
#[context("copying tiles from '{}' to '{}'", reader.name(), writer.name())]
pub fn extract_tiles(reader: &MBTilesReader, writer: &mut MBTilesWriter, config: &ExtractConfig) -> Result<ExtractSummary> {
	for entry in reader.metadata()? {
		writer.add_metadata(&entry)?;
	}

	let mut summary = ExtractSummary::default();
	for level in config.zoom.iter() {
		let bbox = TileBBox::from_geo(level, &config.region)?.flipped_y();
		log::debug!(
			"level {level}: columns {}..={}, rows {}..={} (TMS)",
			bbox.x_min(),
			bbox.x_max(),
			bbox.y_min(),
			bbox.y_max()
		);

		let count = reader.for_each_tile(&bbox, |tile| writer.add_tile(&tile))?;
		println!("Level {level} copied {count} tiles");
		summary.levels.push(LevelReport { level, count });
	}

	if let (Some(min), Some(max)) = (summary.level_min(), summary.level_max()) {
		writer.set_metadata("minzoom", &min.to_string())?;
		writer.set_metadata("maxzoom", &max.to_string())?;
	}

	Ok(summary)
}

fn same_file(a: &Path, b: &Path) -> bool {
	match (a.canonicalize(), b.canonicalize()) {
		(Ok(a), Ok(b)) => a == b,
		_ => a == b,
	}
}
