//! The payload scan pipelines carry

use lathe_geometry::{ScanLine, TriangleMesh};
use lathe_pipeline::api::{DataKind, TaskData};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, sync::Arc};

/// The kind of payload a [`ScanData`] is.
///
/// `Ord` follows declaration order; palette listings rely on it.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScanKind {
	/// No data. Pipeline heads consume this.
	None,

	/// Raw scanner sweeps
	ScanLines,

	/// A triangle mesh
	Mesh,
}

impl Display for ScanKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::None => write!(f, "nothing"),
			Self::ScanLines => write!(f, "scan lines"),
			Self::Mesh => write!(f, "mesh"),
		}
	}
}

impl DataKind for ScanKind {
	fn none() -> Self {
		Self::None
	}
}

/// One payload flowing between scan tasks.
///
/// Cloning is cheap: the bulky variants are wrapped in [`Arc`]. Tasks
/// never mutate a payload in place, they produce a new one.
#[derive(Debug, Clone)]
pub enum ScanData {
	/// No data
	Empty,

	/// Raw scanner sweeps, one [`ScanLine`] per sweep
	Lines(Arc<Vec<ScanLine>>),

	/// A triangle mesh
	Mesh(Arc<TriangleMesh>),
}

impl TaskData for ScanData {
	type Kind = ScanKind;

	fn kind(&self) -> Self::Kind {
		match self {
			Self::Empty => ScanKind::None,
			Self::Lines(_) => ScanKind::ScanLines,
			Self::Mesh(_) => ScanKind::Mesh,
		}
	}
}

impl ScanData {
	/// Wrap scan lines as a payload
	pub fn from_lines(lines: Vec<ScanLine>) -> Self {
		Self::Lines(Arc::new(lines))
	}

	/// Wrap a mesh as a payload
	pub fn from_mesh(mesh: TriangleMesh) -> Self {
		Self::Mesh(Arc::new(mesh))
	}

	/// The scan lines inside, if this payload is lines
	pub fn as_lines(&self) -> Option<&[ScanLine]> {
		match self {
			Self::Lines(x) => Some(x.as_slice()),
			_ => None,
		}
	}

	/// The mesh inside, if this payload is a mesh
	pub fn as_mesh(&self) -> Option<&TriangleMesh> {
		match self {
			Self::Mesh(x) => Some(x.as_ref()),
			_ => None,
		}
	}
}
