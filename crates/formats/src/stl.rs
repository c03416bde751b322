//! Stl triangle meshes.
//!
//! Stl stores a bare list of facets, each with its own normal and three
//! vertices. Nothing else survives: no colors, no shared vertices, no
//! names in the binary flavor. Both encodings recompute facet normals
//! from the triangle winding instead of trusting stored vertex normals,
//! which is what most slicers expect.

use lathe_geometry::{TriangleMesh, Vec3};
use lathe_scan::context::FileFilter;
use std::io::{ErrorKind, Write};

/// The usual file extension for this format
pub const EXTENSION: &str = "stl";

/// The dialog filter for this format
pub const FILTER: FileFilter = FileFilter {
	description: "Stl file",
	extension: EXTENSION,
};

/// The first bytes of every binary file we write.
/// Binary stl must not start with `solid`.
const HEADER_TAG: &[u8] = b"lathe binary stl";

/// Write `mesh` as binary stl: an 80-byte header, a little-endian `u32`
/// facet count, then 50 bytes per facet (normal, three vertices, and a
/// zero attribute byte count).
///
/// Fails with [`ErrorKind::InvalidInput`] if the mesh indexes vertices
/// it doesn't have.
pub fn write_binary<W>(out: &mut W, mesh: &TriangleMesh) -> Result<(), std::io::Error>
where
	W: Write,
{
	if !mesh.is_valid() {
		return Err(bad_mesh());
	}
	let n_triangles = u32::try_from(mesh.triangle_count()).map_err(|_| {
		std::io::Error::new(ErrorKind::InvalidInput, "too many triangles for binary stl")
	})?;

	let mut header = [0u8; 80];
	header[..HEADER_TAG.len()].copy_from_slice(HEADER_TAG);
	out.write_all(&header)?;
	out.write_all(&n_triangles.to_le_bytes())?;

	let vertices = mesh.vertices();
	for tri in mesh.triangles() {
		let a = vertices[tri[0] as usize].position;
		let b = vertices[tri[1] as usize].position;
		let c = vertices[tri[2] as usize].position;

		write_vector(out, facet_normal(a, b, c))?;
		write_vector(out, a)?;
		write_vector(out, b)?;
		write_vector(out, c)?;
		out.write_all(&0u16.to_le_bytes())?;
	}
	return Ok(());
}

/// Write `mesh` as ascii stl, under the given solid name.
pub fn write_ascii<W>(out: &mut W, name: &str, mesh: &TriangleMesh) -> Result<(), std::io::Error>
where
	W: Write,
{
	if !mesh.is_valid() {
		return Err(bad_mesh());
	}

	writeln!(out, "solid {name}")?;
	let vertices = mesh.vertices();
	for tri in mesh.triangles() {
		let a = vertices[tri[0] as usize].position;
		let b = vertices[tri[1] as usize].position;
		let c = vertices[tri[2] as usize].position;

		let n = facet_normal(a, b, c);
		writeln!(out, "  facet normal {} {} {}", n.x, n.y, n.z)?;
		writeln!(out, "    outer loop")?;
		for v in [a, b, c] {
			writeln!(out, "      vertex {} {} {}", v.x, v.y, v.z)?;
		}
		writeln!(out, "    endloop")?;
		writeln!(out, "  endfacet")?;
	}
	writeln!(out, "endsolid {name}")?;
	return Ok(());
}

fn write_vector<W>(out: &mut W, v: Vec3) -> Result<(), std::io::Error>
where
	W: Write,
{
	out.write_all(&v.x.to_le_bytes())?;
	out.write_all(&v.y.to_le_bytes())?;
	out.write_all(&v.z.to_le_bytes())?;
	return Ok(());
}

/// A degenerate triangle gets a zero normal
fn facet_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
	(b - a).cross(c - a).normalize_or_zero()
}

fn bad_mesh() -> std::io::Error {
	std::io::Error::new(
		ErrorKind::InvalidInput,
		"triangle indexes a vertex that doesn't exist",
	)
}
