//! Errors we may encounter while building and running pipelines

use std::{error::Error, fmt::Display};

/// An error produced by a running task
#[derive(Debug)]
pub enum TaskError {
	/// An i/o error while reading or writing task data
	IoError(std::io::Error),

	/// A task was given data of a kind it cannot consume.
	/// Holds the offending kind, rendered.
	UnsupportedData(String),

	/// A save or load task had no file path and no way to ask for one
	MissingPath {
		/// The display name of the task that needed a path
		task: String,
	},

	/// The job's cancel flag was set while this task was running
	Cancelled,

	/// Any other task failure
	Other(Box<dyn Error + Send + Sync>),
}

impl Display for TaskError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::IoError(_) => write!(f, "i/o error while running task"),
			Self::UnsupportedData(kind) => write!(f, "cannot run task on {kind}"),
			Self::MissingPath { task } => write!(f, "no file path set for {task}"),
			Self::Cancelled => write!(f, "task was cancelled"),
			Self::Other(_) => write!(f, "task failed"),
		}
	}
}

impl Error for TaskError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(match self {
			Self::IoError(e) => e,
			Self::Other(e) => e.as_ref(),
			_ => return None,
		})
	}
}

impl From<std::io::Error> for TaskError {
	fn from(value: std::io::Error) -> Self {
		Self::IoError(value)
	}
}

/// An error we encounter while assembling a pipeline
#[derive(Debug)]
pub enum PipelineBuildError {
	/// A pipeline whose first task consumes data
	BadHead {
		/// The display name of the offending task
		task: String,

		/// The kind that task consumes, rendered
		input: String,
	},

	/// Two adjacent tasks whose kinds do not line up
	KindMismatch {
		/// The display name of the upstream task
		prev: String,

		/// What the upstream task produces, rendered
		prev_out: String,

		/// The display name of the downstream task
		next: String,

		/// What the downstream task consumes, rendered
		next_in: String,
	},

	/// A task type name we've never heard of
	UnknownTaskType(String),

	/// A task that rejected the settings its spec gave it
	BadSettings {
		/// The display name of the offending task
		task: String,

		/// What went wrong
		error: SettingsError,
	},

	/// An i/o error while reading a pipeline file
	IoError(std::io::Error),

	/// A pipeline file that isn't valid TOML
	BadToml(toml::de::Error),
}

impl Display for PipelineBuildError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::BadHead { task, input } => {
				write!(f, "first task `{task}` consumes {input}, pipelines start from nothing")
			}
			Self::KindMismatch {
				prev,
				prev_out,
				next,
				next_in,
			} => {
				write!(f, "`{prev}` produces {prev_out}, but `{next}` consumes {next_in}")
			}
			Self::UnknownTaskType(t) => write!(f, "unknown task type `{t}`"),
			Self::BadSettings { task, .. } => write!(f, "bad settings for task `{task}`"),
			Self::IoError(_) => write!(f, "i/o error while reading pipeline"),
			Self::BadToml(_) => write!(f, "pipeline file isn't valid toml"),
		}
	}
}

impl Error for PipelineBuildError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(match self {
			Self::BadSettings { error, .. } => error,
			Self::IoError(e) => e,
			Self::BadToml(e) => e,
			_ => return None,
		})
	}
}

impl From<std::io::Error> for PipelineBuildError {
	fn from(value: std::io::Error) -> Self {
		Self::IoError(value)
	}
}

impl From<toml::de::Error> for PipelineBuildError {
	fn from(value: toml::de::Error) -> Self {
		Self::BadToml(value)
	}
}

/// An error from the task registry
#[derive(Debug)]
pub enum RegistryError {
	/// A task type that was registered twice
	DuplicateTaskType(String),
}

impl Display for RegistryError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::DuplicateTaskType(t) => write!(f, "task type `{t}` is already registered"),
		}
	}
}

impl Error for RegistryError {}

/// An error while loading, saving, or applying task settings
#[derive(Debug)]
pub enum SettingsError {
	/// An i/o error while reading or writing a settings file
	IoError(std::io::Error),

	/// A settings document that isn't valid TOML,
	/// or that doesn't fit the task it was applied to
	BadToml(toml::de::Error),

	/// Settings that cannot be written as TOML
	SerializeError(toml::ser::Error),
}

impl Display for SettingsError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::IoError(_) => write!(f, "i/o error while reading or writing settings"),
			Self::BadToml(_) => write!(f, "settings aren't valid toml"),
			Self::SerializeError(_) => write!(f, "settings cannot be written as toml"),
		}
	}
}

impl Error for SettingsError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		Some(match self {
			Self::IoError(e) => e,
			Self::BadToml(e) => e,
			Self::SerializeError(e) => e,
		})
	}
}

impl From<std::io::Error> for SettingsError {
	fn from(value: std::io::Error) -> Self {
		Self::IoError(value)
	}
}

impl From<toml::de::Error> for SettingsError {
	fn from(value: toml::de::Error) -> Self {
		Self::BadToml(value)
	}
}

impl From<toml::ser::Error> for SettingsError {
	fn from(value: toml::ser::Error) -> Self {
		Self::SerializeError(value)
	}
}
