use r2d2_sqlite::rusqlite::types::Value;

/// One row of the `tiles` table.
///
/// `data` keeps the SQLite storage class of `tile_data`, so rows holding `NULL` or text
/// are copied as they are.
#[derive(Clone, Debug, PartialEq)]
pub struct TileRecord {
	pub level: u8,
	pub column: u32,
	/// TMS row, counted from the south edge.
	pub row: u32,
	pub data: Value,
}

impl TileRecord {
	/// A tile whose data is a blob.
	pub fn blob(level: u8, column: u32, row: u32, data: Vec<u8>) -> TileRecord {
		TileRecord {
			level,
			column,
			row,
			data: Value::Blob(data),
		}
	}
}

/// One row of the `metadata` table. The value keeps its SQLite storage class so it can be
/// copied verbatim.
#[derive(Clone, Debug, PartialEq)]
pub struct MetadataEntry {
	pub name: String,
	pub value: Value,
}

impl MetadataEntry {
	pub fn text(name: &str, value: &str) -> MetadataEntry {
		MetadataEntry {
			name: name.to_string(),
			value: Value::Text(value.to_string()),
		}
	}
}
