use glam::Vec3;

/// One sampled point on a scanned surface.
///
/// Every point carries a normal and a color, even when the producer
/// doesn't know them: unknown normals are zero, unknown colors are white.
/// Exporters decide what to do with zero normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanPoint {
	/// Where this point is, in scanner space
	pub position: Vec3,

	/// Surface normal at this point.
	/// Zero if it was never computed.
	pub normal: Vec3,

	/// sRGB color of this point
	pub color: [u8; 3],
}

impl ScanPoint {
	/// Make a new point with a zero normal and white color.
	pub fn new(position: Vec3) -> Self {
		Self {
			position,
			normal: Vec3::ZERO,
			color: [255, 255, 255],
		}
	}

	/// Set this point's normal
	pub fn with_normal(mut self, normal: Vec3) -> Self {
		self.normal = normal;
		self
	}

	/// Set this point's color
	pub fn with_color(mut self, color: [u8; 3]) -> Self {
		self.color = color;
		self
	}
}

/// Axis-aligned bounds of `points`, as `(min, max)`.
/// `None` if there are no points at all.
#[allow(single_use_lifetimes)] // required: anonymous lifetimes in `impl Trait` are unstable
pub fn bounds<'a>(points: impl IntoIterator<Item = &'a ScanPoint>) -> Option<(Vec3, Vec3)> {
	let mut iter = points.into_iter();
	let first = iter.next()?.position;

	let (min, max) = iter.fold((first, first), |(min, max), p| {
		(min.min(p.position), max.max(p.position))
	});
	return Some((min, max));
}
