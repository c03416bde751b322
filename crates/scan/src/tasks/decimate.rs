//! Point decimation

use lathe_geometry::{total_points, ScanLine};
use lathe_pipeline::{
	api::{Task, TaskCategory, TaskData},
	errors::{SettingsError, TaskError},
	progress::Progress,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
	context::ScanContext,
	data::{ScanData, ScanKind},
};

/// Settings for [`DecimateLines`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecimateSettings {
	/// Keep every `keep_every`-th point of each line.
	/// Values below one behave like one (keep everything).
	pub keep_every: usize,
}

/// Thins each scan line down to every n-th point.
///
/// Line structure is preserved: lines get shorter, none disappear.
#[derive(Debug, Clone)]
pub struct DecimateLines {
	keep_every: usize,
}

impl DecimateLines {
	/// Make a decimator that keeps every other point
	pub fn new() -> Self {
		Self { keep_every: 2 }
	}

	/// Keep every `keep_every`-th point instead
	pub fn keeping_every(mut self, keep_every: usize) -> Self {
		self.keep_every = keep_every;
		self
	}
}

impl Task<ScanData, ScanContext> for DecimateLines {
	fn type_name(&self) -> &'static str {
		"decimate_lines"
	}

	fn name(&self) -> &str {
		"Decimate"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Filter
	}

	fn input_kind(&self) -> ScanKind {
		ScanKind::ScanLines
	}

	fn output_kind(&self) -> ScanKind {
		ScanKind::ScanLines
	}

	fn settings(&self) -> Option<toml::Value> {
		toml::Value::try_from(DecimateSettings {
			keep_every: self.keep_every,
		})
		.ok()
	}

	fn apply_settings(&mut self, settings: toml::Value) -> Result<(), SettingsError> {
		let s: DecimateSettings = settings.try_into()?;
		self.keep_every = s.keep_every;
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

		let step = self.keep_every.max(1);
		let before = total_points(lines);
		let mut out = Vec::with_capacity(lines.len());

		for (i, line) in lines.iter().enumerate() {
			if progress.is_cancelled() {
				return Err(TaskError::Cancelled);
			}

			let kept = line.iter().step_by(step).copied().collect::<Vec<_>>();
			out.push(ScanLine::from_points(kept));
			progress.set_fraction(i + 1, lines.len());
		}

		debug!(
			message = "Decimated scan lines",
			step,
			before,
			after = total_points(&out)
		);
		return Ok(ScanData::from_lines(out));
	}
}
