//! Wavefront obj meshes.
//!
//! A single named object with vertex positions, vertex normals, and
//! triangular faces. Obj indices are 1-based, and each face corner
//! references its position and normal at the same index.

use lathe_geometry::TriangleMesh;
use lathe_scan::context::FileFilter;
use std::io::{ErrorKind, Write};

/// The usual file extension for this format
pub const EXTENSION: &str = "obj";

/// The dialog filter for this format
pub const FILTER: FileFilter = FileFilter {
	description: "Obj file",
	extension: EXTENSION,
};

/// Write a triangle mesh as one obj object under the given name.
///
/// Fails with [`ErrorKind::InvalidInput`] if the mesh indexes vertices
/// it doesn't have.
pub fn write_mesh<W>(out: &mut W, name: &str, mesh: &TriangleMesh) -> Result<(), std::io::Error>
where
	W: Write,
{
	if !mesh.is_valid() {
		return Err(std::io::Error::new(
			ErrorKind::InvalidInput,
			"triangle indexes a vertex that doesn't exist",
		));
	}

	writeln!(out, "o {name}")?;
	for v in mesh.vertices() {
		writeln!(out, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
	}
	for v in mesh.vertices() {
		writeln!(out, "vn {} {} {}", v.normal.x, v.normal.y, v.normal.z)?;
	}
	for tri in mesh.triangles() {
		writeln!(
			out,
			"f {0}//{0} {1}//{1} {2}//{2}",
			tri[0] + 1,
			tri[1] + 1,
			tri[2] + 1,
		)?;
	}
	return Ok(());
}

#[cfg(test)]
mod tests {
	use super::*;
	use lathe_geometry::{ScanPoint, Vec3};

	fn triangle() -> TriangleMesh {
		let mut mesh = TriangleMesh::new();
		let a = mesh.push_vertex(ScanPoint::new(Vec3::ZERO).with_normal(Vec3::Z));
		let b = mesh.push_vertex(ScanPoint::new(Vec3::X).with_normal(Vec3::Z));
		let c = mesh.push_vertex(ScanPoint::new(Vec3::Y).with_normal(Vec3::Z));
		mesh.push_triangle([a, b, c]);
		return mesh;
	}

	#[test]
	fn faces_are_one_based() {
		let mut buf = Vec::new();
		write_mesh(&mut buf, "scan", &triangle()).unwrap();
		let text = String::from_utf8(buf).unwrap();

		assert!(text.starts_with("o scan\n"));
		assert!(text.ends_with("f 1//1 2//2 3//3\n"));
		assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 3);
		assert_eq!(text.lines().filter(|l| l.starts_with("vn ")).count(), 3);
	}

	#[test]
	fn broken_meshes_are_rejected() {
		let mut mesh = TriangleMesh::new();
		mesh.push_vertex(ScanPoint::new(Vec3::ZERO));
		mesh.push_triangle([0, 1, 2]);

		let err = write_mesh(&mut Vec::new(), "scan", &mesh).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidInput);
	}
}
