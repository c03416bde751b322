//! The file half every save and load task shares

use lathe_pipeline::errors::{SettingsError, TaskError};
use lathe_scan::context::{FileFilter, ScanContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings carried by most save and load tasks: the file to use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetSettings {
	/// Where to read or write. Unset means "decide when the task runs".
	pub path: Option<PathBuf>,
}

/// The file a save or load task points at.
///
/// An unset target is legal right up until the task runs: save tasks
/// then fall back to the host's save prompt, and fail only when there
/// is no prompt either, or the user declines it.
#[derive(Debug, Clone, Default)]
pub struct SaveTarget {
	path: Option<PathBuf>,
}

impl SaveTarget {
	/// An unset target
	pub fn new() -> Self {
		Self { path: None }
	}

	/// A target pointing wherever `path` says, including nowhere
	pub fn from_path(path: Option<PathBuf>) -> Self {
		Self { path }
	}

	/// The configured path, if any
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Point this target at `path`
	pub fn set(&mut self, path: impl Into<PathBuf>) {
		self.path = Some(path.into());
	}

	/// This target as task settings
	pub fn settings(&self) -> Option<toml::Value> {
		toml::Value::try_from(TargetSettings {
			path: self.path.clone(),
		})
		.ok()
	}

	/// Replace this target from task settings
	pub fn apply_settings(&mut self, settings: toml::Value) -> Result<(), SettingsError> {
		let s: TargetSettings = settings.try_into()?;
		self.path = s.path;
		Ok(())
	}

	/// The path a save task should write to.
	///
	/// A configured path wins. With none, ask the host's prompt for a
	/// file matching `filter`. With no prompt, or a declined one, fail
	/// under the task's display name.
	pub fn resolve(
		&self,
		ctx: &ScanContext,
		filter: &FileFilter,
		task_name: &str,
	) -> Result<PathBuf, TaskError> {
		if let Some(path) = &self.path {
			return Ok(path.clone());
		}

		if let Some(prompt) = &ctx.save_prompt {
			if let Some(path) = prompt.pick_save_path(filter) {
				debug!(message = "Save path picked interactively", path = ?path);
				return Ok(path);
			}
		}

		return Err(TaskError::MissingPath {
			task: task_name.into(),
		});
	}
}
