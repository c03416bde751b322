use glam::Vec3;

use crate::point::ScanPoint;

/// An indexed triangle mesh.
///
/// Vertices are shared; each triangle names three vertex indices with
/// counter-clockwise winding. Indices are `u32`, which is plenty for
/// anything a desktop scanner produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
	vertices: Vec<ScanPoint>,
	triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
	/// Make an empty mesh
	pub fn new() -> Self {
		Self {
			vertices: Vec::new(),
			triangles: Vec::new(),
		}
	}

	/// Add a vertex, returning its index
	pub fn push_vertex(&mut self, vertex: ScanPoint) -> u32 {
		self.vertices.push(vertex);
		(self.vertices.len() - 1) as u32
	}

	/// Add a triangle over three existing vertex indices
	pub fn push_triangle(&mut self, indices: [u32; 3]) {
		self.triangles.push(indices);
	}

	/// This mesh's vertices
	pub fn vertices(&self) -> &[ScanPoint] {
		&self.vertices
	}

	/// This mesh's triangles, as vertex index triples
	pub fn triangles(&self) -> &[[u32; 3]] {
		&self.triangles
	}

	/// How many vertices does this mesh have?
	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	/// How many triangles does this mesh have?
	pub fn triangle_count(&self) -> usize {
		self.triangles.len()
	}

	/// Do all triangles reference vertices that exist?
	pub fn is_valid(&self) -> bool {
		let n = self.vertices.len() as u32;
		self.triangles
			.iter()
			.all(|t| t.iter().all(|&i| i < n))
	}

	/// Get the three corner points of triangle `face`.
	/// Returns `None` if the face or any of its indices is out of range.
	pub fn face_points(&self, face: usize) -> Option<[&ScanPoint; 3]> {
		let [a, b, c] = *self.triangles.get(face)?;
		Some([
			self.vertices.get(a as usize)?,
			self.vertices.get(b as usize)?,
			self.vertices.get(c as usize)?,
		])
	}

	/// Compute the unit facet normal of triangle `face` from its winding.
	/// Degenerate triangles get a zero normal.
	pub fn face_normal(&self, face: usize) -> Option<Vec3> {
		let [a, b, c] = self.face_points(face)?;
		let n = (b.position - a.position).cross(c.position - a.position);
		Some(n.normalize_or_zero())
	}
}
