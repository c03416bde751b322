//! On-disk pipeline definitions

use serde::Deserialize;
use smartstring::{LazyCompact, SmartString};
use std::{fs, path::Path};

use crate::{
	api::{JobContext, TaskData},
	errors::PipelineBuildError,
	labels::PipelineName,
	pipeline::Pipeline,
	registry::TaskRegistry,
};

/// A pipeline definition, straight out of a TOML document:
///
/// ```toml
/// [pipeline]
/// name = "points-to-file"
///
/// [[task]]
/// type = "load_points"
/// settings = { path = "scan.xyz" }
///
/// [[task]]
/// type = "save_points"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSpec {
	/// The `[pipeline]` block
	pub pipeline: PipelineHeader,

	/// The tasks to run, in order
	#[serde(default, rename = "task")]
	pub tasks: Vec<TaskSpec>,
}

/// The `[pipeline]` block of a pipeline definition
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineHeader {
	/// The pipeline's name
	pub name: PipelineName,
}

/// One `[[task]]` entry of a pipeline definition
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSpec {
	/// The task type to build
	#[serde(rename = "type")]
	pub task_type: SmartString<LazyCompact>,

	/// Settings to apply to the new task.
	/// Omitted means "keep the defaults".
	pub settings: Option<toml::Value>,
}

impl PipelineSpec {
	/// Parse a definition from TOML text
	pub fn from_toml(text: &str) -> Result<Self, PipelineBuildError> {
		Ok(toml::from_str(text)?)
	}

	/// Read and parse a definition file
	pub fn from_file(path: &Path) -> Result<Self, PipelineBuildError> {
		let text = fs::read_to_string(path)?;
		Self::from_toml(&text)
	}

	/// Build a runnable pipeline, resolving each task type against
	/// `registry` and applying each task's settings.
	pub fn build<D: TaskData, C: JobContext>(
		&self,
		registry: &TaskRegistry<D, C>,
	) -> Result<Pipeline<D, C>, PipelineBuildError> {
		let mut pipeline = Pipeline::new(self.pipeline.name.clone());

		for spec in &self.tasks {
			let mut task = registry.make_task(&spec.task_type).ok_or_else(|| {
				PipelineBuildError::UnknownTaskType(spec.task_type.to_string())
			})?;

			if let Some(settings) = &spec.settings {
				task.apply_settings(settings.clone()).map_err(|error| {
					PipelineBuildError::BadSettings {
						task: task.name().into(),
						error,
					}
				})?;
			}

			pipeline.push_task(task)?;
		}

		return Ok(pipeline);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		progress::{CancelFlag, Progress},
		testutil::*,
	};

	fn test_registry() -> TaskRegistry<Value, NullContext> {
		let mut registry = TaskRegistry::new();
		registry.register(|| Box::new(EmitNumber::new(0))).unwrap();
		registry.register(|| Box::new(AddOne::new())).unwrap();
		registry
			.register(|| Box::new(NumberToText::new()))
			.unwrap();
		registry
	}

	#[test]
	fn build_applies_settings_in_order() {
		let spec = PipelineSpec::from_toml(
			r#"
			[pipeline]
			name = "sum"

			[[task]]
			type = "emit_number"
			settings = { value = 41 }

			[[task]]
			type = "add_one"

			[[task]]
			type = "number_to_text"
			"#,
		)
		.unwrap();

		let mut pipeline = spec.build(&test_registry()).unwrap();
		assert_eq!(pipeline.name.as_ref(), "sum");
		assert_eq!(pipeline.len(), 3);

		// The configured value actually made it into the task.
		let mut progress = Progress::new(CancelFlag::new());
		let out = pipeline.tasks[0]
			.run(&NullContext, Value::Empty, &mut progress)
			.unwrap();
		assert_eq!(out, Value::Number(41));
	}

	#[test]
	fn unknown_types_are_build_errors() {
		let spec = PipelineSpec::from_toml(
			r#"
			[pipeline]
			name = "bad"

			[[task]]
			type = "does_not_exist"
			"#,
		)
		.unwrap();

		let res = spec.build(&test_registry());
		assert!(matches!(
			res,
			Err(PipelineBuildError::UnknownTaskType(t)) if t == "does_not_exist"
		));
	}

	#[test]
	fn bad_settings_are_build_errors() {
		let spec = PipelineSpec::from_toml(
			r#"
			[pipeline]
			name = "bad"

			[[task]]
			type = "emit_number"
			settings = { value = "not a number" }
			"#,
		)
		.unwrap();

		let res = spec.build(&test_registry());
		assert!(matches!(
			res,
			Err(PipelineBuildError::BadSettings { task, .. }) if task == "Emit number"
		));
	}

	#[test]
	fn kind_mismatches_are_build_errors() {
		let spec = PipelineSpec::from_toml(
			r#"
			[pipeline]
			name = "bad"

			[[task]]
			type = "emit_number"

			[[task]]
			type = "number_to_text"

			[[task]]
			type = "add_one"
			"#,
		)
		.unwrap();

		let res = spec.build(&test_registry());
		assert!(matches!(
			res,
			Err(PipelineBuildError::KindMismatch { .. })
		));
	}

	#[test]
	fn bad_toml_is_a_parse_error() {
		let res = PipelineSpec::from_toml("[pipeline");
		assert!(matches!(res, Err(PipelineBuildError::BadToml(_))));
	}
}
