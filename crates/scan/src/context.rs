//! What every scan task can see while it runs

use lathe_pipeline::{api::JobContext, settings::SettingsStore};
use std::{fmt::Display, path::PathBuf, sync::Arc};

/// A description of the files a save task writes, shown when asking
/// the user where to save one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
	/// What kind of file this is, e.g. `"Stl file"`
	pub description: &'static str,

	/// The file extension, without the dot
	pub extension: &'static str,
}

impl Display for FileFilter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}|*.{}", self.description, self.extension)
	}
}

/// How a host asks its user where to save a file.
///
/// Interactive hosts pop a dialog. Headless hosts don't have one of
/// these at all, and save tasks with no configured path fail instead
/// of blocking on input that will never come.
pub trait SavePrompt: Send + Sync {
	/// Ask for a save path for a file matching `filter`.
	/// `None` means the user declined.
	fn pick_save_path(&self, filter: &FileFilter) -> Option<PathBuf>;
}

/// Everything a scan task can reach while it runs.
///
/// One context is shared by every task in a job; tasks only ever
/// borrow it.
pub struct ScanContext {
	/// Stored per-task-type settings
	pub settings: SettingsStore,

	/// How to ask the user for a save path.
	/// `None` means "never ask": unset save paths become task errors.
	pub save_prompt: Option<Arc<dyn SavePrompt>>,
}

impl ScanContext {
	/// Make a context with settings stored under `settings_root` and no
	/// way to prompt. Nothing is touched on disk until a task saves
	/// settings.
	pub fn new(settings_root: impl Into<PathBuf>) -> Self {
		Self {
			settings: SettingsStore::new(settings_root),
			save_prompt: None,
		}
	}

	/// Use `prompt` to ask for unset save paths
	pub fn with_save_prompt(mut self, prompt: Arc<dyn SavePrompt>) -> Self {
		self.save_prompt = Some(prompt);
		self
	}
}

impl JobContext for ScanContext {}
