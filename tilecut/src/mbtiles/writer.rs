//! Write tiles and metadata into an MBTiles (SQLite) database.
//!
//! The writer never deletes an existing file: it creates the `tiles` and `metadata`
//! tables and their unique indexes only if they are missing, so repeated runs add to
//! (or overwrite rows of) the same archive.
//!
//! The connection is tuned for a single bulk-loading writer: `synchronous = OFF`,
//! `locking_mode = EXCLUSIVE` and `journal_mode = DELETE`. No other process may write
//! to the file while an `MBTilesWriter` is open.
//!
//! All writes happen inside one transaction which [`MBTilesWriter::finish`] commits,
//! followed by `ANALYZE` and `VACUUM`. Dropping the writer without calling `finish`
//! discards everything written through it.

use super::{MetadataEntry, TileRecord};
use anyhow::Result;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::{SqliteConnectionManager, rusqlite::params};
use std::{path::Path, time::Duration};
use tilecut_derive::context;

/// Writer for MBTiles (SQLite) containers.
pub struct MBTilesWriter {
	name: String,
	conn: PooledConnection<SqliteConnectionManager>,
}

impl MBTilesWriter {
	/// Opens (or creates) the MBTiles file at `path`, ensures the schema and starts a transaction.
	///
	/// # Errors
	/// Returns an error if the database cannot be opened or locked, or the schema cannot be created.
	#[context("opening MBTiles destination '{}'", path.display())]
	pub fn open_path(path: &Path) -> Result<MBTilesWriter> {
		log::debug!("open {path:?} for writing");

		let manager = SqliteConnectionManager::file(path).with_init(|conn| {
			conn.execute_batch("PRAGMA synchronous = OFF")?;
			conn.query_row("PRAGMA locking_mode = EXCLUSIVE", [], |row| row.get::<_, String>(0))?;
			conn.query_row("PRAGMA journal_mode = DELETE", [], |row| row.get::<_, String>(0))?;
			Ok(())
		});
		let pool = Pool::builder()
			.max_size(1)
			.connection_timeout(Duration::from_secs(1))
			.build(manager)?;
		let conn = pool.get()?;

		conn.execute_batch(
			"CREATE TABLE IF NOT EXISTS tiles (zoom_level INTEGER, tile_column INTEGER, tile_row INTEGER, tile_data BLOB);
			CREATE TABLE IF NOT EXISTS metadata (name TEXT, value TEXT);
			CREATE UNIQUE INDEX IF NOT EXISTS tile_index ON tiles (zoom_level, tile_column, tile_row);
			CREATE UNIQUE INDEX IF NOT EXISTS metadata_index ON metadata (name);
			BEGIN;",
		)?;

		Ok(MBTilesWriter {
			name: path.display().to_string(),
			conn,
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Inserts or replaces a metadata key-value pair with a text value.
	#[context("setting metadata key '{}' = '{}'", name, value)]
	pub fn set_metadata(&self, name: &str, value: &str) -> Result<()> {
		self.add_metadata(&MetadataEntry::text(name, value))
	}

	/// Inserts or replaces a metadata row, keeping the value's storage type.
	#[context("writing metadata key '{}'", entry.name)]
	pub fn add_metadata(&self, entry: &MetadataEntry) -> Result<()> {
		self.conn
			.prepare_cached("INSERT OR REPLACE INTO metadata (name, value) VALUES (?1, ?2)")?
			.execute(params![entry.name, entry.value])?;
		Ok(())
	}

	/// Inserts or replaces a tile. `tile.row` is stored as is (TMS orientation).
	#[context("writing tile {}/{}/{}", tile.level, tile.column, tile.row)]
	pub fn add_tile(&mut self, tile: &TileRecord) -> Result<()> {
		self.conn
			.prepare_cached(
				"INSERT OR REPLACE INTO tiles (zoom_level, tile_column, tile_row, tile_data) VALUES (?1, ?2, ?3, ?4)",
			)?
			.execute(params![tile.level, tile.column, tile.row, tile.data])?;
		Ok(())
	}

	/// Commits all writes, refreshes the query planner statistics and compacts the file.
	#[context("finishing MBTiles destination '{}'", self.name)]
	pub fn finish(self) -> Result<()> {
		log::debug!("commit and optimize {}", self.name);
		self.conn.execute_batch("COMMIT; ANALYZE; VACUUM;")?;
		Ok(())
	}
}
