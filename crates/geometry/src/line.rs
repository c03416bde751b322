use crate::point::ScanPoint;

/// An ordered run of points produced by one scanner sweep.
///
/// Lines are kept separate all the way to the exporters: formats that
/// understand grouping (xyz) write one blank-separated block per line,
/// formats that don't (ply points) flatten them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanLine {
	points: Vec<ScanPoint>,
}

impl ScanLine {
	/// Make an empty scan line
	pub fn new() -> Self {
		Self { points: Vec::new() }
	}

	/// Make a scan line from the given points
	pub fn from_points(points: Vec<ScanPoint>) -> Self {
		Self { points }
	}

	/// Append a point to this line
	pub fn push(&mut self, point: ScanPoint) {
		self.points.push(point);
	}

	/// How many points does this line have?
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// Does this line have no points?
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Iterate over this line's points, in sweep order
	pub fn iter(&self) -> impl Iterator<Item = &ScanPoint> {
		self.points.iter()
	}

	/// This line's points, in sweep order
	pub fn points(&self) -> &[ScanPoint] {
		&self.points
	}
}

/// Count the points across all the given lines
pub fn total_points(lines: &[ScanLine]) -> usize {
	lines.iter().map(|l| l.len()).sum()
}
