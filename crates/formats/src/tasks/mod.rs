//! Save and load tasks over the format modules.
//!
//! Save tasks end a pipeline: their declared output is
//! [`ScanKind::None`](lathe_scan::data::ScanKind), so nothing can
//! follow them, and on success they hand their input on as the job's
//! output. Each one's settings carry the target path, resolved at run
//! time through the host's
//! [`SavePrompt`](lathe_scan::context::SavePrompt) when unset.

mod load_points;
mod save_mesh;
mod save_points;
mod target;

pub use load_points::LoadPoints;
pub use save_mesh::{SaveMesh, SaveObj, SavePly, SaveStl, StlSettings};
pub use save_points::{SavePoints, SaveXyz};
pub use target::{SaveTarget, TargetSettings};

use lathe_pipeline::{errors::RegistryError, registry::TaskRegistry};
use lathe_scan::{context::ScanContext, data::ScanData};
use std::path::Path;

/// Register every task in this crate
pub fn register(registry: &mut TaskRegistry<ScanData, ScanContext>) -> Result<(), RegistryError> {
	registry.register(|| Box::new(LoadPoints::new()))?;
	registry.register(|| Box::new(SavePoints::new()))?;
	registry.register(|| Box::new(SaveXyz::new()))?;
	registry.register(|| Box::new(SaveMesh::new()))?;
	registry.register(|| Box::new(SaveStl::new()))?;
	registry.register(|| Box::new(SavePly::new()))?;
	registry.register(|| Box::new(SaveObj::new()))?;
	return Ok(());
}

/// The lowercased extension of `path`, if it has one
pub(crate) fn extension_of(path: &Path) -> Option<String> {
	path.extension()
		.map(|e| e.to_string_lossy().to_ascii_lowercase())
}
