//! Writing point clouds out of a pipeline

use lathe_geometry::total_points;
use lathe_pipeline::{
	api::{Task, TaskCategory, TaskData},
	errors::{SettingsError, TaskError},
	progress::Progress,
};
use lathe_scan::{
	context::{FileFilter, ScanContext},
	data::{ScanData, ScanKind},
};
use std::{
	fs::File,
	io::{BufWriter, Write},
	path::PathBuf,
};
use tracing::info;

use super::{extension_of, target::SaveTarget};
use crate::{ply, xyz};

/// The filter a [`SavePoints`] task prompts with. The task writes xyz
/// unless the picked name says otherwise.
const POINTS_FILTER: FileFilter = FileFilter {
	description: "Point cloud",
	extension: xyz::EXTENSION,
};

/// Saves the current point cloud, picking the format from the file
/// name: `.ply` writes ply, anything else writes xyz.
///
/// Save tasks end a pipeline. On success the data they wrote becomes
/// the job's output.
#[derive(Debug, Clone)]
pub struct SavePoints {
	target: SaveTarget,
}

impl SavePoints {
	/// Make a save task with no path configured
	pub fn new() -> Self {
		Self {
			target: SaveTarget::new(),
		}
	}

	/// Write to `path`
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.target.set(path);
		self
	}
}

impl Task<ScanData, ScanContext> for SavePoints {
	fn type_name(&self) -> &'static str {
		"save_points"
	}

	fn name(&self) -> &str {
		"Save points"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Io
	}

	fn input_kind(&self) -> ScanKind {
		ScanKind::ScanLines
	}

	fn output_kind(&self) -> ScanKind {
		ScanKind::None
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
		ctx: &ScanContext,
		data: ScanData,
		_progress: &mut Progress<'_>,
	) -> Result<ScanData, TaskError> {
		let lines = match data.as_lines() {
			Some(x) => x,
			None => return Err(TaskError::UnsupportedData(data.kind().to_string())),
		};

		let path = self.target.resolve(ctx, &POINTS_FILTER, self.name())?;
		let mut out = BufWriter::new(File::create(&path)?);
		match extension_of(&path).as_deref() {
			Some(ply::EXTENSION) => ply::write_points(&mut out, lines)?,
			_ => xyz::write_lines(&mut out, lines)?,
		}
		out.flush()?;

		info!(
			message = "Saved points",
			path = ?path,
			n_points = total_points(lines),
		);
		return Ok(data);
	}
}

/// Saves the current point cloud as xyz, whatever the file is called.
#[derive(Debug, Clone)]
pub struct SaveXyz {
	target: SaveTarget,
}

impl SaveXyz {
	/// Make a save task with no path configured
	pub fn new() -> Self {
		Self {
			target: SaveTarget::new(),
		}
	}

	/// Write to `path`
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.target.set(path);
		self
	}
}

impl Task<ScanData, ScanContext> for SaveXyz {
	fn type_name(&self) -> &'static str {
		"save_xyz"
	}

	fn name(&self) -> &str {
		"Save XYZ"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Io
	}

	fn input_kind(&self) -> ScanKind {
		ScanKind::ScanLines
	}

	fn output_kind(&self) -> ScanKind {
		ScanKind::None
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
		ctx: &ScanContext,
		data: ScanData,
		_progress: &mut Progress<'_>,
	) -> Result<ScanData, TaskError> {
		let lines = match data.as_lines() {
			Some(x) => x,
			None => return Err(TaskError::UnsupportedData(data.kind().to_string())),
		};

		let path = self.target.resolve(ctx, &xyz::FILTER, self.name())?;
		let mut out = BufWriter::new(File::create(&path)?);
		xyz::write_lines(&mut out, lines)?;
		out.flush()?;

		info!(
			message = "Saved points",
			path = ?path,
			n_points = total_points(lines),
		);
		return Ok(data);
	}
}
