use anyhow::{Result, bail, ensure};
use pretty_assertions::assert_eq;
use tilecut_derive::context;

#[context("checking level {level}")]
fn check_level(level: u8) -> Result<u8> {
	ensure!(level <= 31, "level ({level}) must be <= 31");
	Ok(level)
}

struct Store {
	name: String,
}

impl Store {
	#[context("reading '{}' from '{}'", key, self.name)]
	fn read(&self, key: &str) -> Result<String> {
		if key.is_empty() {
			bail!("empty key");
		}
		Ok(format!("{}:{key}", self.name))
	}
}

#[test]
fn passes_ok_values_through() -> Result<()> {
	assert_eq!(check_level(14)?, 14);
	let store = Store { name: "world".into() };
	assert_eq!(store.read("name")?, "world:name");
	Ok(())
}

#[test]
fn adds_context_to_errors() {
	let err = check_level(40).unwrap_err();
	assert_eq!(err.to_string(), "checking level 40");
	assert_eq!(err.root_cause().to_string(), "level (40) must be <= 31");
}

#[test]
fn formats_method_arguments() {
	let store = Store { name: "world".into() };
	let err = store.read("").unwrap_err();
	let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
	assert_eq!(chain, vec!["reading '' from 'world'", "empty key"]);
}
