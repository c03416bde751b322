//! Toy payloads and tasks this crate's tests run pipelines over.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

use crate::{
	api::{DataKind, JobContext, Task, TaskCategory, TaskData},
	errors::{SettingsError, TaskError},
	progress::Progress,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValueKind {
	None,
	Number,
	Text,
}

impl Display for ValueKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::None => write!(f, "nothing"),
			Self::Number => write!(f, "numbers"),
			Self::Text => write!(f, "text"),
		}
	}
}

impl DataKind for ValueKind {
	fn none() -> Self {
		Self::None
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	Empty,
	Number(i64),
	Text(String),
}

impl TaskData for Value {
	type Kind = ValueKind;

	fn kind(&self) -> Self::Kind {
		match self {
			Self::Empty => ValueKind::None,
			Self::Number(_) => ValueKind::Number,
			Self::Text(_) => ValueKind::Text,
		}
	}
}

pub struct NullContext;

impl JobContext for NullContext {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitNumberSettings {
	pub value: i64,
}

/// Produces a configured number out of thin air.
#[derive(Debug, Clone)]
pub struct EmitNumber {
	value: i64,
}

impl EmitNumber {
	pub fn new(value: i64) -> Self {
		Self { value }
	}
}

impl Task<Value, NullContext> for EmitNumber {
	fn type_name(&self) -> &'static str {
		"emit_number"
	}

	fn name(&self) -> &str {
		"Emit number"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Input
	}

	fn input_kind(&self) -> ValueKind {
		ValueKind::None
	}

	fn output_kind(&self) -> ValueKind {
		ValueKind::Number
	}

	fn settings(&self) -> Option<toml::Value> {
		toml::Value::try_from(EmitNumberSettings { value: self.value }).ok()
	}

	fn apply_settings(&mut self, settings: toml::Value) -> Result<(), SettingsError> {
		let s: EmitNumberSettings = settings.try_into()?;
		self.value = s.value;
		Ok(())
	}

	fn clone_task(&self) -> Box<dyn Task<Value, NullContext>> {
		Box::new(self.clone())
	}

	fn run(
		&mut self,
		_ctx: &NullContext,
		_data: Value,
		_progress: &mut Progress<'_>,
	) -> Result<Value, TaskError> {
		Ok(Value::Number(self.value))
	}
}

/// Adds one.
#[derive(Debug, Clone)]
pub struct AddOne;

impl AddOne {
	pub fn new() -> Self {
		Self
	}
}

impl Task<Value, NullContext> for AddOne {
	fn type_name(&self) -> &'static str {
		"add_one"
	}

	fn name(&self) -> &str {
		"Add one"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Filter
	}

	fn input_kind(&self) -> ValueKind {
		ValueKind::Number
	}

	fn output_kind(&self) -> ValueKind {
		ValueKind::Number
	}

	fn clone_task(&self) -> Box<dyn Task<Value, NullContext>> {
		Box::new(self.clone())
	}

	fn run(
		&mut self,
		_ctx: &NullContext,
		data: Value,
		_progress: &mut Progress<'_>,
	) -> Result<Value, TaskError> {
		match &data {
			Value::Number(x) => Ok(Value::Number(x + 1)),
			_ => Err(TaskError::UnsupportedData(data.kind().to_string())),
		}
	}
}

/// Doubles a number.
#[derive(Debug, Clone)]
pub struct DoubleNumber;

impl DoubleNumber {
	pub fn new() -> Self {
		Self
	}
}

impl Task<Value, NullContext> for DoubleNumber {
	fn type_name(&self) -> &'static str {
		"double_number"
	}

	fn name(&self) -> &str {
		"Double number"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Filter
	}

	fn input_kind(&self) -> ValueKind {
		ValueKind::Number
	}

	fn output_kind(&self) -> ValueKind {
		ValueKind::Number
	}

	fn clone_task(&self) -> Box<dyn Task<Value, NullContext>> {
		Box::new(self.clone())
	}

	fn run(
		&mut self,
		_ctx: &NullContext,
		data: Value,
		_progress: &mut Progress<'_>,
	) -> Result<Value, TaskError> {
		match &data {
			Value::Number(x) => Ok(Value::Number(x * 2)),
			_ => Err(TaskError::UnsupportedData(data.kind().to_string())),
		}
	}
}

/// Renders a number as text.
#[derive(Debug, Clone)]
pub struct NumberToText;

impl NumberToText {
	pub fn new() -> Self {
		Self
	}
}

impl Task<Value, NullContext> for NumberToText {
	fn type_name(&self) -> &'static str {
		"number_to_text"
	}

	fn name(&self) -> &str {
		"Number to text"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Transform
	}

	fn input_kind(&self) -> ValueKind {
		ValueKind::Number
	}

	fn output_kind(&self) -> ValueKind {
		ValueKind::Text
	}

	fn clone_task(&self) -> Box<dyn Task<Value, NullContext>> {
		Box::new(self.clone())
	}

	fn run(
		&mut self,
		_ctx: &NullContext,
		data: Value,
		_progress: &mut Progress<'_>,
	) -> Result<Value, TaskError> {
		match &data {
			Value::Number(x) => Ok(Value::Text(x.to_string())),
			_ => Err(TaskError::UnsupportedData(data.kind().to_string())),
		}
	}
}

/// Uppercases text.
#[derive(Debug, Clone)]
pub struct TextUpper;

impl TextUpper {
	pub fn new() -> Self {
		Self
	}
}

impl Task<Value, NullContext> for TextUpper {
	fn type_name(&self) -> &'static str {
		"text_upper"
	}

	fn name(&self) -> &str {
		"Text upper"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Unknown
	}

	fn input_kind(&self) -> ValueKind {
		ValueKind::Text
	}

	fn output_kind(&self) -> ValueKind {
		ValueKind::Text
	}

	fn clone_task(&self) -> Box<dyn Task<Value, NullContext>> {
		Box::new(self.clone())
	}

	fn run(
		&mut self,
		_ctx: &NullContext,
		data: Value,
		_progress: &mut Progress<'_>,
	) -> Result<Value, TaskError> {
		match &data {
			Value::Text(x) => Ok(Value::Text(x.to_uppercase())),
			_ => Err(TaskError::UnsupportedData(data.kind().to_string())),
		}
	}
}

/// Fails every time it runs.
#[derive(Debug, Clone)]
pub struct FailAlways;

impl FailAlways {
	pub fn new() -> Self {
		Self
	}
}

impl Task<Value, NullContext> for FailAlways {
	fn type_name(&self) -> &'static str {
		"fail_always"
	}

	fn name(&self) -> &str {
		"Fail always"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Unknown
	}

	fn input_kind(&self) -> ValueKind {
		ValueKind::Text
	}

	fn output_kind(&self) -> ValueKind {
		ValueKind::Text
	}

	fn clone_task(&self) -> Box<dyn Task<Value, NullContext>> {
		Box::new(self.clone())
	}

	fn run(
		&mut self,
		_ctx: &NullContext,
		_data: Value,
		_progress: &mut Progress<'_>,
	) -> Result<Value, TaskError> {
		Err(TaskError::Other("boom".into()))
	}
}

/// Counts slowly, polling for cancellation on every step.
#[derive(Debug, Clone)]
pub struct SlowCount {
	steps: usize,
}

impl SlowCount {
	pub fn new(steps: usize) -> Self {
		Self { steps }
	}
}

impl Task<Value, NullContext> for SlowCount {
	fn type_name(&self) -> &'static str {
		"slow_count"
	}

	fn name(&self) -> &str {
		"Slow count"
	}

	fn category(&self) -> TaskCategory {
		TaskCategory::Filter
	}

	fn input_kind(&self) -> ValueKind {
		ValueKind::Number
	}

	fn output_kind(&self) -> ValueKind {
		ValueKind::Number
	}

	fn clone_task(&self) -> Box<dyn Task<Value, NullContext>> {
		Box::new(self.clone())
	}

	fn run(
		&mut self,
		_ctx: &NullContext,
		data: Value,
		progress: &mut Progress<'_>,
	) -> Result<Value, TaskError> {
		let n = match &data {
			Value::Number(x) => *x,
			_ => return Err(TaskError::UnsupportedData(data.kind().to_string())),
		};

		for i in 0..self.steps {
			if progress.is_cancelled() {
				return Err(TaskError::Cancelled);
			}
			std::thread::sleep(Duration::from_millis(1));
			progress.set_fraction(i + 1, self.steps);
		}

		Ok(Value::Number(n))
	}
}
