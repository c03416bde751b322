//! Reading saved point clouds back into a pipeline

use lathe_geometry::total_points;
use lathe_pipeline::{
	api::{Task, TaskCategory},
	errors::{SettingsError, TaskError},
	progress::Progress,
};
use lathe_scan::{
	context::ScanContext,
	data::{ScanData, ScanKind},
};
use std::{fs::File, io::BufReader, path::PathBuf};
use tracing::info;

use super::target::SaveTarget;
use crate::xyz;

/// Reads an xyz point cloud from a configured file.
///
/// This is how saved scans come back into a pipeline. Load tasks never
/// prompt: an unset path is an error when the task runs.
#[derive(Debug, Clone)]
pub struct LoadPoints {
	target: SaveTarget,
}

impl LoadPoints {
	/// Make a load task with no path configured
	pub fn new() -> Self {
		Self {
			target: SaveTarget::new(),
		}
	}

	/// Read from `path`
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.target.set(path);
		self
	}
}

impl Task<ScanData, ScanContext> for LoadPoints {
	fn type_name(&self) -> &'static str {
		"load_points"
	}

	fn name(&self) -> &str {
		"Load points"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Input
	}

	fn input_kind(&self) -> ScanKind {
		ScanKind::None
	}

	fn output_kind(&self) -> ScanKind {
		ScanKind::ScanLines
	}

	fn settings(&self) -> Option<toml::Value> {
		self.target.settings()
	}

	fn apply_settings(&mut self, settings: toml::Value) -> Result<(), SettingsError> {
		self.target.apply_settings(settings)
	}

	fn clone_task(&self) -> Box<dyn Task<ScanData, ScanContext>> {
		Box::new(self.clone())
	}

	fn run(
		&mut self,
		_ctx: &ScanContext,
		_data: ScanData,
		_progress: &mut Progress<'_>,
	) -> Result<ScanData, TaskError> {
		let path = match self.target.path() {
			Some(x) => x.to_path_buf(),
			None => {
				return Err(TaskError::MissingPath {
					task: self.name().into(),
				})
			}
		};

		let file = File::open(&path)?;
		let lines = xyz::read_lines(BufReader::new(file))?;

		info!(
			message = "Loaded points",
			path = ?path,
			n_lines = lines.len(),
			n_points = total_points(&lines),
		);
		return Ok(ScanData::from_lines(lines));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lathe_pipeline::progress::CancelFlag;

	fn test_ctx() -> ScanContext {
		ScanContext::new("unused-settings")
	}

	#[test]
	fn loads_grouped_points() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("cloud.xyz");
		std::fs::write(&path, "0 0 0 10 20 30\n1 0 0\n\n0 1 0\n").unwrap();

		let mut task = LoadPoints::new().with_path(&path);
		let mut progress = Progress::new(CancelFlag::new());
		let out = task.run(&test_ctx(), ScanData::Empty, &mut progress).unwrap();

		let lines = out.as_lines().unwrap();
		assert_eq!(lines.len(), 2);
		assert_eq!(lines[0].len(), 2);
		assert_eq!(lines[0].points()[0].color, [10, 20, 30]);
		assert_eq!(lines[1].len(), 1);
	}

	#[test]
	fn unset_paths_are_an_error() {
		let mut task = LoadPoints::new();
		let mut progress = Progress::new(CancelFlag::new());

		let err = task
			.run(&test_ctx(), ScanData::Empty, &mut progress)
			.unwrap_err();
		assert_eq!(err.to_string(), "no file path set for Load points");
	}

	#[test]
	fn missing_files_are_io_errors() {
		let dir = tempfile::tempdir().unwrap();
		let mut task = LoadPoints::new().with_path(dir.path().join("nope.xyz"));

		let mut progress = Progress::new(CancelFlag::new());
		let res = task.run(&test_ctx(), ScanData::Empty, &mut progress);
		assert!(matches!(res, Err(TaskError::IoError(_))));
	}

	#[test]
	fn malformed_files_name_the_line() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("cloud.xyz");
		std::fs::write(&path, "0 0 0\n1 2\n").unwrap();

		let mut task = LoadPoints::new().with_path(&path);
		let mut progress = Progress::new(CancelFlag::new());
		let err = task
			.run(&test_ctx(), ScanData::Empty, &mut progress)
			.unwrap_err();

		let source = std::error::Error::source(&err).unwrap();
		assert_eq!(source.to_string(), "line 2: expected 3 or 6 fields, got 2");
	}
}
