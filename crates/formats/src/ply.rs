//! Ascii ply, for point clouds and meshes.
//!
//! Ply is the one format here that carries everything we know about a
//! point: position, normal, and color. Point clouds are written as a
//! vertex element alone; meshes add a face element of triangle index
//! lists. Scan line grouping does not survive, ply has no place for it.

use lathe_geometry::{total_points, ScanLine, ScanPoint, TriangleMesh};
use lathe_scan::context::FileFilter;
use std::io::{ErrorKind, Write};

/// The usual file extension for this format
pub const EXTENSION: &str = "ply";

/// The dialog filter for this format
pub const FILTER: FileFilter = FileFilter {
	description: "Ply file",
	extension: EXTENSION,
};

/// Write scan lines as a flat ply point cloud.
pub fn write_points<W>(out: &mut W, lines: &[ScanLine]) -> Result<(), std::io::Error>
where
	W: Write,
{
	write_header(out, total_points(lines), None)?;
	for line in lines {
		for p in line.iter() {
			write_vertex(out, p)?;
		}
	}
	return Ok(());
}

/// Write a triangle mesh as ply, faces included.
///
/// Fails with [`ErrorKind::InvalidInput`] if the mesh indexes vertices
/// it doesn't have.
pub fn write_mesh<W>(out: &mut W, mesh: &TriangleMesh) -> Result<(), std::io::Error>
where
	W: Write,
{
	if !mesh.is_valid() {
		return Err(std::io::Error::new(
			ErrorKind::InvalidInput,
			"triangle indexes a vertex that doesn't exist",
		));
	}

	write_header(out, mesh.vertex_count(), Some(mesh.triangle_count()))?;
	for p in mesh.vertices() {
		write_vertex(out, p)?;
	}
	for tri in mesh.triangles() {
		writeln!(out, "3 {} {} {}", tri[0], tri[1], tri[2])?;
	}
	return Ok(());
}

fn write_header<W>(out: &mut W, n_vertices: usize, n_faces: Option<usize>) -> Result<(), std::io::Error>
where
	W: Write,
{
	writeln!(out, "ply")?;
	writeln!(out, "format ascii 1.0")?;
	writeln!(out, "comment lathe scan export")?;
	writeln!(out, "element vertex {n_vertices}")?;
	for axis in ["x", "y", "z", "nx", "ny", "nz"] {
		writeln!(out, "property float {axis}")?;
	}
	for channel in ["red", "green", "blue"] {
		writeln!(out, "property uchar {channel}")?;
	}
	if let Some(n) = n_faces {
		writeln!(out, "element face {n}")?;
		writeln!(out, "property list uchar int vertex_indices")?;
	}
	writeln!(out, "end_header")?;
	return Ok(());
}

fn write_vertex<W>(out: &mut W, p: &ScanPoint) -> Result<(), std::io::Error>
where
	W: Write,
{
	writeln!(
		out,
		"{} {} {} {} {} {} {} {} {}",
		p.position.x,
		p.position.y,
		p.position.z,
		p.normal.x,
		p.normal.y,
		p.normal.z,
		p.color[0],
		p.color[1],
		p.color[2],
	)?;
	return Ok(());
}

#[cfg(test)]
mod tests {
	use super::*;
	use lathe_geometry::Vec3;

	#[test]
	fn point_headers_declare_every_property() {
		let lines = vec![
			ScanLine::from_points(vec![
				ScanPoint::new(Vec3::new(1.0, 2.0, 3.0))
					.with_normal(Vec3::Z)
					.with_color([255, 0, 0]),
				ScanPoint::new(Vec3::ZERO),
			]),
			ScanLine::from_points(vec![ScanPoint::new(Vec3::ONE)]),
		];

		let mut buf = Vec::new();
		write_points(&mut buf, &lines).unwrap();
		let text = String::from_utf8(buf).unwrap();
		let rows: Vec<&str> = text.lines().collect();

		assert_eq!(rows[0], "ply");
		assert_eq!(rows[1], "format ascii 1.0");
		assert_eq!(rows[3], "element vertex 3");
		assert_eq!(rows[4], "property float x");
		assert_eq!(rows[9], "property float nz");
		assert_eq!(rows[10], "property uchar red");
		assert_eq!(rows[13], "end_header");

		// Grouping flattens away, the points just follow each other
		assert_eq!(rows[14], "1 2 3 0 0 1 255 0 0");
		assert_eq!(rows.len(), 14 + 3);
	}

	#[test]
	fn mesh_files_carry_faces() {
		let mut mesh = TriangleMesh::new();
		let a = mesh.push_vertex(ScanPoint::new(Vec3::ZERO));
		let b = mesh.push_vertex(ScanPoint::new(Vec3::X));
		let c = mesh.push_vertex(ScanPoint::new(Vec3::Y));
		mesh.push_triangle([a, b, c]);

		let mut buf = Vec::new();
		write_mesh(&mut buf, &mesh).unwrap();
		let text = String::from_utf8(buf).unwrap();

		assert!(text.contains("element vertex 3\n"));
		assert!(text.contains("element face 1\n"));
		assert!(text.contains("property list uchar int vertex_indices\n"));
		assert!(text.ends_with("3 0 1 2\n"));
	}

	#[test]
	fn broken_meshes_are_rejected() {
		let mut mesh = TriangleMesh::new();
		mesh.push_triangle([0, 0, 0]);

		let err = write_mesh(&mut Vec::new(), &mesh).unwrap_err();
		assert_eq!(err.kind(), ErrorKind::InvalidInput);
	}
}
