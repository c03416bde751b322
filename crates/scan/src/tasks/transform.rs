//! Point transforms

use lathe_geometry::{ScanLine, Vec3};
use lathe_pipeline::{
	api::{Task, TaskCategory, TaskData},
	errors::{SettingsError, TaskError},
	progress::Progress,
};
use serde::{Deserialize, Serialize};

use crate::{
	context::ScanContext,
	data::{ScanData, ScanKind},
};

/// Settings for [`TransformPoints`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformSettings {
	/// Uniform scale applied to every position
	#[serde(default = "TransformSettings::default_scale")]
	pub scale: f32,

	/// Offset added to every position, after scaling
	#[serde(default)]
	pub translate: [f32; 3],
}

impl TransformSettings {
	fn default_scale() -> f32 {
		1.0
	}
}

/// Scales and translates every point of every scan line.
///
/// Normals are left alone: a uniform scale doesn't change directions,
/// and a translation doesn't change them at all.
#[derive(Debug, Clone)]
pub struct TransformPoints {
	scale: f32,
	translate: Vec3,
}

impl TransformPoints {
	/// Make an identity transform
	pub fn new() -> Self {
		Self {
			scale: 1.0,
			translate: Vec3::ZERO,
		}
	}

	/// Scale every position by `scale`
	pub fn with_scale(mut self, scale: f32) -> Self {
		self.scale = scale;
		self
	}

	/// Move every position by `translate`, after scaling
	pub fn with_translation(mut self, translate: Vec3) -> Self {
		self.translate = translate;
		self
	}
}

impl Task<ScanData, ScanContext> for TransformPoints {
	fn type_name(&self) -> &'static str {
		"transform_points"
	}

	fn name(&self) -> &str {
		"Transform"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Transform
	}

	fn input_kind(&self) -> ScanKind {
		ScanKind::ScanLines
	}

	fn output_kind(&self) -> ScanKind {
		ScanKind::ScanLines
	}

	fn settings(&self) -> Option<toml::Value> {
		toml::Value::try_from(TransformSettings {
			scale: self.scale,
			translate: self.translate.to_array(),
		})
		.ok()
	}

	fn apply_settings(&mut self, settings: toml::Value) -> Result<(), SettingsError> {
		let s: TransformSettings = settings.try_into()?;
		self.scale = s.scale;
		self.translate = Vec3::from_array(s.translate);
		Ok(())
	}

	fn clone_task(&self) -> Box<dyn Task<ScanData, ScanContext>> {
		Box::new(self.clone())
	}

	fn run(
		&mut self,
		_ctx: &ScanContext,
		data: ScanData,
		progress: &mut Progress<'_>,
	) -> Result<ScanData, TaskError> {
		let lines = match data.as_lines() {
			Some(x) => x,
			None => return Err(TaskError::UnsupportedData(data.kind().to_string())),
		};

		let mut out = Vec::with_capacity(lines.len());
		for (i, line) in lines.iter().enumerate() {
			if progress.is_cancelled() {
				return Err(TaskError::Cancelled);
			}

			let moved = line
				.iter()
				.map(|p| {
					let mut p = *p;
					p.position = p.position * self.scale + self.translate;
					p
				})
				.collect::<Vec<_>>();
			out.push(ScanLine::from_points(moved));
			progress.set_fraction(i + 1, lines.len());
		}

		return Ok(ScanData::from_lines(out));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lathe_geometry::ScanPoint;
	use lathe_pipeline::progress::CancelFlag;

	#[test]
	fn scales_then_translates() {
		let mut task = TransformPoints::new()
			.with_scale(2.0)
			.with_translation(Vec3::new(1.0, 0.0, -1.0));

		let point = ScanPoint::new(Vec3::new(1.0, 2.0, 3.0))
			.with_normal(Vec3::Z)
			.with_color([10, 20, 30]);
		let data = ScanData::from_lines(vec![ScanLine::from_points(vec![point])]);

		let mut progress = Progress::new(CancelFlag::new());
		let out = task
			.run(&ScanContext::new("unused-settings"), data, &mut progress)
			.unwrap();

		let moved = out.as_lines().unwrap()[0].points()[0];
		assert_eq!(moved.position, Vec3::new(3.0, 4.0, 5.0));
		assert_eq!(moved.normal, Vec3::Z);
		assert_eq!(moved.color, [10, 20, 30]);
	}

	#[test]
	fn identity_is_the_default() {
		let task = TransformPoints::new();
		let settings: TransformSettings = task.settings().unwrap().try_into().unwrap();
		assert_eq!(settings.scale, 1.0);
		assert_eq!(settings.translate, [0.0; 3]);
	}

	#[test]
	fn omitted_settings_fields_keep_defaults() {
		let mut task = TransformPoints::new();
		let partial: toml::Value = toml::from_str("scale = 3.0").unwrap();
		task.apply_settings(partial).unwrap();

		assert_eq!(task.scale, 3.0);
		assert_eq!(task.translate, Vec3::ZERO);
	}
}
