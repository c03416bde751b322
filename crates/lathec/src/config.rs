//! This module contains lathec's config defaults & deserializer.
//! A few notes:
//!
//! - All config fields that *can* have a default *should* have a default
//! - All config fields should be listed and documented in `default-config.toml`

use serde::Deserialize;
use std::{
	error::Error,
	fmt::Display,
	fs::File,
	io::Write,
	path::{Path, PathBuf},
};

/// Client configuration
#[derive(Deserialize, Debug, Default)]
pub struct LathecConfig {
	/// Path settings
	#[serde(default)]
	pub paths: LathePathConfig,

	#[serde(default)]
	pub logging: LatheLoggingConfig,
}

impl LathecConfig {
	pub const DEFAULT_CONFIG: &'static str = include_str!("./default-config.toml");

	/// Write the default config to the given path, overwriting if it already exists.
	pub fn create_default_config(path: &Path) -> Result<(), std::io::Error> {
		let mut file = File::create(path)?;
		file.write_all(Self::DEFAULT_CONFIG.as_bytes())?;
		return Ok(());
	}

	/// Load a config from a file.
	///
	/// This is the only valid way to read a config file,
	/// since this method makes sure paths are valid
	pub fn load_from_file(config_path: &Path) -> Result<Self, Box<dyn Error>> {
		let config_path = std::fs::canonicalize(config_path)?;
		let config_string = std::fs::read_to_string(&config_path)?;
		let mut config: Self = toml::from_str(&config_string)?;

		// Now, adjust paths so that they are relative to the config file
		config.paths.set_relative_to(config_path.parent().unwrap());
		return Ok(config);
	}

	/// Load a config from a file, falling back to defaults if there is no
	/// such file.
	///
	/// `lathec` runs fine without a config file; `lathec new` writes one
	/// for projects that want to change the defaults.
	pub fn load_or_default(config_path: &Path) -> Result<Self, Box<dyn Error>> {
		if !config_path.is_file() {
			return Ok(Self::default());
		}
		return Self::load_from_file(config_path);
	}
}

/// Path settings
#[derive(Deserialize, Debug)]
pub struct LathePathConfig {
	/// Where stored task settings live
	#[serde(default = "LathePathConfig::default_settings_dir")]
	pub settings_dir: PathBuf,

	/// Where pipeline definitions live
	#[serde(default = "LathePathConfig::default_pipeline_dir")]
	pub pipeline_dir: PathBuf,
}

impl Default for LathePathConfig {
	fn default() -> Self {
		Self {
			settings_dir: Self::default_settings_dir(),
			pipeline_dir: Self::default_pipeline_dir(),
		}
	}
}

impl LathePathConfig {
	fn default_settings_dir() -> PathBuf {
		"settings".into()
	}

	fn default_pipeline_dir() -> PathBuf {
		"pipelines".into()
	}

	/// Adjust all paths in this config to be relative to `root_path`
	fn set_relative_to(&mut self, root_path: &Path) {
		self.settings_dir = root_path.join(&self.settings_dir);
		self.pipeline_dir = root_path.join(&self.pipeline_dir);
	}
}

#[derive(Deserialize, Debug)]
pub enum LogLevel {
	Trace,
	Debug,
	Info,
	Warn,
	Error,
}

impl Default for LogLevel {
	fn default() -> Self {
		Self::Info
	}
}

impl Display for LogLevel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Trace => write!(f, "trace"),
			Self::Debug => write!(f, "debug"),
			Self::Info => write!(f, "info"),
			Self::Warn => write!(f, "warn"),
			Self::Error => write!(f, "error"),
		}
	}
}

/// Logging settings
#[derive(Deserialize, Debug, Default)]
pub struct LatheLoggingConfig {
	#[serde(default)]
	pub level: LatheLogLevelConfig,
}

impl LatheLoggingConfig {
	/// Convert this logging config to a tracing env filter
	pub fn to_env_filter(&self) -> String {
		self.level.to_env_filter()
	}
}

/// Logging settings
#[derive(Deserialize, Debug)]
pub struct LatheLogLevelConfig {
	#[serde(default)]
	pub engine: LogLevel,

	#[serde(default)]
	pub runner: LogLevel,

	#[serde(default = "LatheLogLevelConfig::default_tasks")]
	pub tasks: LogLevel,

	#[serde(default = "LatheLogLevelConfig::default_all")]
	pub all: LogLevel,
}

impl Default for LatheLogLevelConfig {
	fn default() -> Self {
		Self {
			engine: LogLevel::default(),
			runner: LogLevel::default(),

			// These can get noisy, so default to a higher level
			tasks: Self::default_tasks(),
			all: Self::default_all(),
		}
	}
}

impl LatheLogLevelConfig {
	fn default_tasks() -> LogLevel {
		LogLevel::Warn
	}

	fn default_all() -> LogLevel {
		LogLevel::Warn
	}

	/// Convert this logging config to a tracing env filter
	pub fn to_env_filter(&self) -> String {
		[
			format!("lathe_pipeline::runner={}", self.runner),
			format!("lathe_pipeline={}", self.engine),
			format!("lathe_scan={}", self.tasks),
			format!("lathe_formats={}", self.tasks),
			self.all.to_string(),
		]
		.join(",")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Make sure the default config we ship with is valid
	#[test]
	fn default_config_is_valid() {
		let _x: LathecConfig = toml::from_str(LathecConfig::DEFAULT_CONFIG).unwrap();
	}

	#[test]
	fn missing_files_fall_back_to_defaults() {
		let config = LathecConfig::load_or_default(Path::new("does-not-exist.toml")).unwrap();
		assert_eq!(config.paths.settings_dir, Path::new("settings"));
		assert_eq!(config.paths.pipeline_dir, Path::new("pipelines"));
	}

	#[test]
	fn paths_follow_the_config_file() {
		let dir = tempfile::tempdir().unwrap();
		let config_path = dir.path().join("lathe.toml");
		std::fs::write(&config_path, "[paths]\npipeline_dir = \"my-pipelines\"\n").unwrap();

		let config = LathecConfig::load_or_default(&config_path).unwrap();
		assert!(config.paths.pipeline_dir.ends_with("my-pipelines"));
		assert!(config.paths.pipeline_dir.is_absolute());

		// Unset paths still move with the config file
		assert!(config.paths.settings_dir.ends_with("settings"));
	}

	#[test]
	fn log_levels_become_an_env_filter() {
		let config = LatheLoggingConfig::default();
		assert_eq!(
			config.to_env_filter(),
			"lathe_pipeline::runner=info,lathe_pipeline=info,lathe_scan=warn,lathe_formats=warn,warn"
		);
	}
}
