//! Extract a geographic region and a range of zoom levels from an MBTiles file into
//! another MBTiles file.
//!
//! - [`config::ExtractConfig`] describes a run.
//! - [`extract::run`] performs it and reports how many tiles were copied per level.
//! - [`mbtiles`] contains the SQLite reader and writer.

pub mod config;
pub mod extract;
pub mod mbtiles;

pub use tilecut_core as core;
