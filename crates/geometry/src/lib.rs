//! Geometry primitives shared by every lathe crate.
//!
//! This crate only carries plain data: points with normals and color,
//! the scan lines a scanner sweep produces, and indexed triangle meshes.
//! Anything that *computes* geometry (reconstruction, smoothing, ...)
//! lives elsewhere.

mod line;
mod mesh;
mod point;

pub use line::{total_points, ScanLine};
pub use mesh::TriangleMesh;
pub use point::{bounds, ScanPoint};

pub use glam::Vec3;
