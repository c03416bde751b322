//! On-disk task settings.
//!
//! Settings are per task *type*, not per task instance: a host that lets
//! users tweak a task saves the result so the next task of that type starts
//! from the same place.

use std::{
	fs,
	io::ErrorKind,
	path::{Path, PathBuf},
};
use tracing::warn;

use crate::errors::SettingsError;

/// A directory of per-task-type settings documents.
///
/// Each task type gets one TOML file under the root, named
/// `<type_name>.config.toml`. The root directory is created on first save.
pub struct SettingsStore {
	root: PathBuf,
}

impl SettingsStore {
	/// Make a store rooted at `root`. Nothing is touched until a save.
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	/// The directory this store reads and writes
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// The file settings for `type_name` live in
	pub fn path_for(&self, type_name: &str) -> PathBuf {
		self.root.join(format!("{type_name}.config.toml"))
	}

	/// Write `settings` as the stored document for `type_name`,
	/// replacing whatever was there.
	pub fn save(&self, type_name: &str, settings: &toml::Value) -> Result<(), SettingsError> {
		fs::create_dir_all(&self.root)?;
		let text = toml::to_string(settings)?;
		fs::write(self.path_for(type_name), text)?;
		return Ok(());
	}

	/// Load the stored document for `type_name`.
	/// Returns `Ok(None)` if none has ever been saved.
	pub fn load(&self, type_name: &str) -> Result<Option<toml::Value>, SettingsError> {
		let text = match fs::read_to_string(self.path_for(type_name)) {
			Ok(x) => x,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) => return Err(e.into()),
		};

		let value = toml::from_str(&text)?;
		return Ok(Some(value));
	}

	/// [`SettingsStore::load`], with failures degraded to a warning.
	///
	/// Hosts that prefer default settings over an error use this.
	/// The document that failed to load is left in place.
	pub fn load_or_default(&self, type_name: &str) -> Option<toml::Value> {
		match self.load(type_name) {
			Ok(x) => x,
			Err(error) => {
				warn!(
					message = "Could not load task settings, using defaults",
					type_name, ?error
				);
				None
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_settings_are_none() {
		let dir = tempfile::tempdir().unwrap();
		let store = SettingsStore::new(dir.path().join("settings"));

		assert!(store.load("save_stl").unwrap().is_none());
		assert!(store.load_or_default("save_stl").is_none());
	}

	#[test]
	fn save_then_load_round_trips() {
		let dir = tempfile::tempdir().unwrap();

		// A root that doesn't exist yet is created by the first save.
		let store = SettingsStore::new(dir.path().join("settings"));

		let mut table = toml::value::Table::new();
		table.insert("path".into(), toml::Value::String("scan.stl".into()));
		let settings = toml::Value::Table(table);

		store.save("save_stl", &settings).unwrap();
		assert_eq!(store.load("save_stl").unwrap(), Some(settings.clone()));
		assert_eq!(store.load_or_default("save_stl"), Some(settings));
	}

	#[test]
	fn corrupt_settings_are_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let store = SettingsStore::new(dir.path());

		std::fs::write(store.path_for("save_stl"), "not { toml").unwrap();

		assert!(store.load("save_stl").is_err());
		assert!(store.load_or_default("save_stl").is_none());
	}
}
