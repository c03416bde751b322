//! Writing reconstructed meshes out of a pipeline

use lathe_geometry::TriangleMesh;
use lathe_pipeline::{
	api::{Task, TaskCategory, TaskData},
	errors::{SettingsError, TaskError},
	progress::Progress,
};
use lathe_scan::{
	context::{FileFilter, ScanContext},
	data::{ScanData, ScanKind},
};
use serde::{Deserialize, Serialize};
use std::{
	fs::File,
	io::{BufWriter, Write},
	path::{Path, PathBuf},
};
use tracing::info;

use super::{extension_of, target::SaveTarget};
use crate::{obj, ply, stl};

/// The filter a [`SaveMesh`] task prompts with. The task writes
/// binary stl unless the picked name says otherwise.
const MESH_FILTER: FileFilter = FileFilter {
	description: "Mesh",
	extension: stl::EXTENSION,
};

/// The formats [`SaveMesh`] dispatches between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeshFormat {
	Stl,
	Ply,
	Obj,
}

impl MeshFormat {
	fn for_path(path: &Path) -> Self {
		match extension_of(path).as_deref() {
			Some(ply::EXTENSION) => Self::Ply,
			Some(obj::EXTENSION) => Self::Obj,
			_ => Self::Stl,
		}
	}

	fn write(self, path: &Path, mesh: &TriangleMesh) -> Result<(), TaskError> {
		let mut out = BufWriter::new(File::create(path)?);
		match self {
			Self::Stl => stl::write_binary(&mut out, mesh)?,
			Self::Ply => ply::write_mesh(&mut out, mesh)?,
			Self::Obj => obj::write_mesh(&mut out, &object_name(path), mesh)?,
		}
		out.flush()?;
		return Ok(());
	}
}

/// The file stem, for formats that name their contents
fn object_name(path: &Path) -> String {
	path.file_stem()
		.map(|s| s.to_string_lossy().into_owned())
		.unwrap_or_else(|| "mesh".into())
}

/// Saves the current mesh, picking the format from the file name:
/// `.ply` and `.obj` write those, anything else writes binary stl.
///
/// Save tasks end a pipeline. On success the data they wrote becomes
/// the job's output.
#[derive(Debug, Clone)]
pub struct SaveMesh {
	target: SaveTarget,
}

impl SaveMesh {
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

impl Task<ScanData, ScanContext> for SaveMesh {
	fn type_name(&self) -> &'static str {
		"save_mesh"
	}

	fn name(&self) -> &str {
		"Save mesh"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Io
	}

	fn input_kind(&self) -> ScanKind {
		ScanKind::Mesh
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
		let mesh = match data.as_mesh() {
			Some(x) => x,
			None => return Err(TaskError::UnsupportedData(data.kind().to_string())),
		};

		let path = self.target.resolve(ctx, &MESH_FILTER, self.name())?;
		MeshFormat::for_path(&path).write(&path, mesh)?;

		info!(
			message = "Saved mesh",
			path = ?path,
			n_triangles = mesh.triangle_count(),
		);
		return Ok(data);
	}
}

/// Settings for [`SaveStl`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StlSettings {
	/// Where to write. Unset means "decide when the task runs".
	pub path: Option<PathBuf>,

	/// Write the ascii flavor instead of binary
	#[serde(default)]
	pub ascii: bool,
}

/// Saves the current mesh as stl, binary unless told otherwise.
#[derive(Debug, Clone)]
pub struct SaveStl {
	target: SaveTarget,
	ascii: bool,
}

impl SaveStl {
	/// Make a binary stl save task with no path configured
	pub fn new() -> Self {
		Self {
			target: SaveTarget::new(),
			ascii: false,
		}
	}

	/// Write to `path`
	pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
		self.target.set(path);
		self
	}

	/// Write ascii stl instead of binary
	pub fn with_ascii(mut self, ascii: bool) -> Self {
		self.ascii = ascii;
		self
	}
}

impl Task<ScanData, ScanContext> for SaveStl {
	fn type_name(&self) -> &'static str {
		"save_stl"
	}

	fn name(&self) -> &str {
		"Save STL"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Io
	}

	fn input_kind(&self) -> ScanKind {
		ScanKind::Mesh
	}

	fn output_kind(&self) -> ScanKind {
		ScanKind::None
	}

	fn settings(&self) -> Option<toml::Value> {
		toml::Value::try_from(StlSettings {
			path: self.target.path().map(|p| p.to_path_buf()),
			ascii: self.ascii,
		})
		.ok()
	}

	fn apply_settings(&mut self, settings: toml::Value) -> Result<(), SettingsError> {
		let s: StlSettings = settings.try_into()?;
		self.target = SaveTarget::from_path(s.path);
		self.ascii = s.ascii;
		Ok(())
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
		let mesh = match data.as_mesh() {
			Some(x) => x,
			None => return Err(TaskError::UnsupportedData(data.kind().to_string())),
		};

		let path = self.target.resolve(ctx, &stl::FILTER, self.name())?;
		let mut out = BufWriter::new(File::create(&path)?);
		if self.ascii {
			stl::write_ascii(&mut out, &object_name(&path), mesh)?;
		} else {
			stl::write_binary(&mut out, mesh)?;
		}
		out.flush()?;

		info!(
			message = "Saved mesh",
			path = ?path,
			n_triangles = mesh.triangle_count(),
		);
		return Ok(data);
	}
}

/// Saves the current mesh as ply, whatever the file is called.
#[derive(Debug, Clone)]
pub struct SavePly {
	target: SaveTarget,
}

impl SavePly {
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

impl Task<ScanData, ScanContext> for SavePly {
	fn type_name(&self) -> &'static str {
		"save_ply"
	}

	fn name(&self) -> &str {
		"Save PLY"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Io
	}

	fn input_kind(&self) -> ScanKind {
		ScanKind::Mesh
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
		let mesh = match data.as_mesh() {
			Some(x) => x,
			None => return Err(TaskError::UnsupportedData(data.kind().to_string())),
		};

		let path = self.target.resolve(ctx, &ply::FILTER, self.name())?;
		let mut out = BufWriter::new(File::create(&path)?);
		ply::write_mesh(&mut out, mesh)?;
		out.flush()?;

		info!(
			message = "Saved mesh",
			path = ?path,
			n_triangles = mesh.triangle_count(),
		);
		return Ok(data);
	}
}

/// Saves the current mesh as obj, whatever the file is called.
#[derive(Debug, Clone)]
pub struct SaveObj {
	target: SaveTarget,
}

impl SaveObj {
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

impl Task<ScanData, ScanContext> for SaveObj {
	fn type_name(&self) -> &'static str {
		"save_obj"
	}

	fn name(&self) -> &str {
		"Save OBJ"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Io
	}

	fn input_kind(&self) -> ScanKind {
		ScanKind::Mesh
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
		let mesh = match data.as_mesh() {
			Some(x) => x,
			None => return Err(TaskError::UnsupportedData(data.kind().to_string())),
		};

		let path = self.target.resolve(ctx, &obj::FILTER, self.name())?;
		let mut out = BufWriter::new(File::create(&path)?);
		obj::write_mesh(&mut out, &object_name(&path), mesh)?;
		out.flush()?;

		info!(
			message = "Saved mesh",
			path = ?path,
			n_triangles = mesh.triangle_count(),
		);
		return Ok(data);
	}
}
