//! Read tiles and metadata from an MBTiles (SQLite) database.
//!
//! The database is opened read-only and must provide a `tiles` and a `metadata` relation.
//! Both may be tables or views: many MBTiles producers store deduplicated tiles in
//! separate tables and expose them through a `tiles` view.
//!
//! ## Usage
//! ```rust,no_run
//! use tilecut::mbtiles::MBTilesReader;
//! use tilecut_core::TileBBox;
//! use std::path::Path;
//!
//! let reader = MBTilesReader::open_path(Path::new("world.mbtiles")).unwrap();
//! for entry in reader.metadata().unwrap() {
//!     println!("{} = {:?}", entry.name, entry.value);
//! }
//!
//! let bbox = TileBBox::new_full(2).unwrap();
//! let count = reader.for_each_tile(&bbox, |_tile| Ok(())).unwrap();
//! println!("level 2 holds {count} tiles");
//! ```

use super::{MetadataEntry, TileRecord};
use anyhow::{Result, ensure};
use r2d2::Pool;
use r2d2_sqlite::{
	SqliteConnectionManager,
	rusqlite::{OpenFlags, OptionalExtension, params, types::Value},
};
use std::{path::Path, time::Duration};
use tilecut_core::TileBBox;
use tilecut_derive::context;

/// Read-only access to an MBTiles database.
#[derive(Debug)]
pub struct MBTilesReader {
	name: String,
	pool: Pool<SqliteConnectionManager>,
}

impl MBTilesReader {
	/// Opens an existing MBTiles file read-only and checks its schema.
	///
	/// # Errors
	/// Returns an error if the file does not exist, cannot be opened as SQLite, or lacks
	/// a `tiles` or `metadata` table.
	#[context("opening MBTiles at '{}'", path.display())]
	pub fn open_path(path: &Path) -> Result<MBTilesReader> {
		log::debug!("open {path:?}");

		ensure!(path.exists(), "file {path:?} does not exist");
		ensure!(path.is_file(), "{path:?} is not a file");

		let manager = SqliteConnectionManager::file(path)
			.with_flags(OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX);
		let pool = Pool::builder()
			.max_size(1)
			.connection_timeout(Duration::from_secs(1))
			.build(manager)?;

		let reader = MBTilesReader {
			name: path.display().to_string(),
			pool,
		};
		reader.check_schema()?;

		Ok(reader)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	#[context("checking schema of '{}'", self.name)]
	fn check_schema(&self) -> Result<()> {
		let conn = self.pool.get()?;
		for relation in ["tiles", "metadata"] {
			let found: bool = conn.query_row(
				"SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1)",
				[relation],
				|row| row.get(0),
			)?;
			ensure!(found, "mbtiles file {} has no '{relation}' table", self.name);
		}
		Ok(())
	}

	/// All rows of the `metadata` table, values kept in their stored type.
	#[context("reading metadata from '{}'", self.name)]
	pub fn metadata(&self) -> Result<Vec<MetadataEntry>> {
		let conn = self.pool.get()?;
		let mut stmt = conn.prepare("SELECT name, value FROM metadata")?;
		let entries = stmt
			.query_map([], |row| {
				Ok(MetadataEntry {
					name: row.get(0)?,
					value: row.get(1)?,
				})
			})?
			.collect::<Result<Vec<_>, _>>()?;
		Ok(entries)
	}

	/// A single metadata value rendered as text, `None` if the key is missing.
	#[context("reading metadata '{}' from '{}'", name, self.name)]
	pub fn get_metadata(&self, name: &str) -> Result<Option<String>> {
		let conn = self.pool.get()?;
		let value: Option<Option<String>> = conn
			.query_row(
				"SELECT CAST(value AS TEXT) FROM metadata WHERE name = ?1",
				[name],
				|row| row.get(0),
			)
			.optional()?;
		Ok(value.flatten())
	}

	/// Calls `callback` for every tile inside `bbox` and returns how many tiles were visited.
	///
	/// `bbox` must use TMS rows, like the `tile_row` column.
	///
	/// # Errors
	/// Returns the first error of the query or of `callback`.
	#[context("reading tiles {:?} from '{}'", bbox, self.name)]
	pub fn for_each_tile<F>(&self, bbox: &TileBBox, mut callback: F) -> Result<u64>
	where
		F: FnMut(TileRecord) -> Result<()>,
	{
		log::trace!("query tiles {bbox:?}");

		let conn = self.pool.get()?;
		let mut stmt = conn.prepare(
			"SELECT zoom_level, tile_column, tile_row, tile_data FROM tiles
			WHERE zoom_level = ?1 AND tile_column BETWEEN ?2 AND ?3 AND tile_row BETWEEN ?4 AND ?5",
		)?;
		let mut rows = stmt.query(params![
			bbox.level(),
			bbox.x_min(),
			bbox.x_max(),
			bbox.y_min(),
			bbox.y_max()
		])?;

		let mut count = 0u64;
		while let Some(row) = rows.next()? {
			callback(TileRecord {
				level: row.get(0)?,
				column: row.get(1)?,
				row: row.get(2)?,
				data: row.get(3)?,
			})?;
			count += 1;
		}

		log::trace!("got {count} tiles");
		Ok(count)
	}

	/// Stored `tile_data` of the tile at `level`/`column`/TMS `row`, if the row exists.
	#[context("reading tile {}/{}/{} from '{}'", level, column, row, self.name)]
	pub fn get_tile(&self, level: u8, column: u32, row: u32) -> Result<Option<Value>> {
		let conn = self.pool.get()?;
		let data = conn
			.query_row(
				"SELECT tile_data FROM tiles WHERE zoom_level = ?1 AND tile_column = ?2 AND tile_row = ?3",
				params![level, column, row],
				|row| row.get::<_, Value>(0),
			)
			.optional()?;
		Ok(data)
	}

	/// Number of rows in the `tiles` table.
	#[context("counting tiles in '{}'", self.name)]
	pub fn count_tiles(&self) -> Result<u64> {
		let conn = self.pool.get()?;
		let count: i64 = conn.query_row("SELECT COUNT(*) FROM tiles", [], |row| row.get(0))?;
		Ok(u64::try_from(count)?)
	}
}
