//! The task trait and the types that describe tasks.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

use crate::{
	errors::{SettingsError, TaskError},
	progress::Progress,
};

/// The lifecycle state of one task slot in a job.
///
/// Slots move `NotStarted` → `Running` → `Finished` or `Failed`,
/// and are reset to `NotStarted` before every job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
	/// This task has not been started
	NotStarted,

	/// This task is running right now
	Running,

	/// This task finished without error
	Finished,

	/// This task failed or was cancelled
	Failed,
}

impl TaskStatus {
	/// Is this [`TaskStatus::NotStarted`]?
	pub fn is_notstarted(&self) -> bool {
		matches!(self, Self::NotStarted)
	}

	/// Is this [`TaskStatus::Running`]?
	pub fn is_running(&self) -> bool {
		matches!(self, Self::Running)
	}

	/// Is this [`TaskStatus::Finished`]?
	pub fn is_finished(&self) -> bool {
		matches!(self, Self::Finished)
	}

	/// Is this [`TaskStatus::Failed`]?
	pub fn is_failed(&self) -> bool {
		matches!(self, Self::Failed)
	}
}

/// The palette group a task belongs to.
/// Declaration order is the order groups are listed in.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TaskCategory {
	/// Tasks that bring data into a pipeline
	Input,

	/// Tasks that drop or keep points
	Filter,

	/// Tasks that move points around
	Transform,

	/// Tasks that smooth scan lines
	Smooth,

	/// Tasks that build a mesh out of scan lines
	MeshBuild,

	/// Tasks that adjust point color
	Color,

	/// Tasks that read or write files
	Io,

	/// Everything else
	Unknown,
}

impl Display for TaskCategory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Input => write!(f, "Input"),
			Self::Filter => write!(f, "Filter"),
			Self::Transform => write!(f, "Transform"),
			Self::Smooth => write!(f, "Smooth"),
			Self::MeshBuild => write!(f, "Mesh build"),
			Self::Color => write!(f, "Color"),
			Self::Io => write!(f, "File"),
			Self::Unknown => write!(f, "Unknown"),
		}
	}
}

/// The "type tag" of a payload: the kind of data a task consumes or produces.
///
/// Implemented once per payload family, usually on a fieldless enum.
/// `Ord` matters: kind order breaks ties when sorting a palette.
pub trait DataKind
where
	Self: Debug
		+ Display
		+ Clone
		+ Copy
		+ PartialEq
		+ Eq
		+ PartialOrd
		+ Ord
		+ Send
		+ Sync
		+ 'static,
{
	/// The kind that means "no data".
	/// Pipeline heads consume this; terminal tasks produce it.
	fn none() -> Self;

	/// Is this the "no data" kind?
	fn is_none(&self) -> bool {
		*self == Self::none()
	}
}

/// A payload that flows between tasks.
///
/// Cloning must be cheap. Payload families with bulky variants should
/// wrap them in [`std::sync::Arc`].
pub trait TaskData
where
	Self: Debug + Clone + Send + Sync + 'static,
{
	/// The kind tag for this payload family
	type Kind: DataKind;

	/// What kind of data is this?
	fn kind(&self) -> Self::Kind;
}

/// Per-job state handed to every task in a job.
///
/// Tasks only borrow the context while they run; anything a task should
/// keep must go in its settings.
pub trait JobContext
where
	Self: Send + Sync + 'static,
{
}

/// One processing step in a pipeline.
///
/// A task declares what it consumes and produces as [`DataKind`]s, carries
/// its own settings, and does all its work in [`Task::run`]. Run state
/// (status, percent, error message) is owned by the runner, never by the
/// task, so one task instance can be run again and again.
pub trait Task<D, C>
where
	D: TaskData,
	C: JobContext,
	Self: Send,
{
	/// The stable identifier of this task type.
	/// Keys registry entries and settings files; never shown to users.
	fn type_name(&self) -> &'static str;

	/// The name shown in palette listings
	fn name(&self) -> &str;

	/// The palette group this task belongs to
	fn category(&self) -> TaskCategory;

	/// The payload kind this task consumes
	fn input_kind(&self) -> D::Kind;

	/// The payload kind this task produces
	fn output_kind(&self) -> D::Kind;

	/// This task's public settings as a TOML value.
	/// Tasks with nothing to configure return `None`.
	fn settings(&self) -> Option<toml::Value> {
		None
	}

	/// Replace this task's settings.
	/// Tasks with nothing to configure ignore the value.
	fn apply_settings(&mut self, settings: toml::Value) -> Result<(), SettingsError> {
		let _ = settings;
		Ok(())
	}

	/// Clone this task into a fresh box.
	/// The clone carries the same settings; run state stays with the runner.
	fn clone_task(&self) -> Box<dyn Task<D, C>>;

	/// Run this task over `data` and return what it produced.
	///
	/// Save tasks return their input unchanged so later tasks can keep
	/// going. On error nothing is produced and the job stops. Long loops
	/// should report through `progress` and poll its cancel flag.
	fn run(&mut self, ctx: &C, data: D, progress: &mut Progress<'_>) -> Result<D, TaskError>;

	/// Can this task run on data of kind `kind`?
	fn accepts(&self, kind: D::Kind) -> bool {
		self.input_kind() == kind
	}

	/// Can this task run directly after `prev`?
	fn can_follow(&self, prev: &dyn Task<D, C>) -> bool {
		self.input_kind() == prev.output_kind()
	}

	/// Could this task sit between `prev` and `next`?
	///
	/// `None` for `prev` means the very start of a pipeline, where only
	/// tasks that consume nothing may go. `None` for `next` means the end,
	/// which accepts anything.
	fn can_insert_between(
		&self,
		prev: Option<&dyn Task<D, C>>,
		next: Option<&dyn Task<D, C>>,
	) -> bool {
		let upstream_ok = match prev {
			Some(p) => self.input_kind() == p.output_kind(),
			None => self.input_kind().is_none(),
		};

		let downstream_ok = match next {
			Some(n) => n.input_kind() == self.output_kind(),
			None => true,
		};

		return upstream_ok && downstream_ok;
	}

	/// Does this task consume `prev_out` and produce `next_in`?
	fn fits_between(&self, prev_out: D::Kind, next_in: D::Kind) -> bool {
		self.input_kind() == prev_out && self.output_kind() == next_in
	}

	/// Where this task sorts in a palette listing:
	/// category first, then input kind, then output kind, then name.
	fn sort_key(&self) -> (TaskCategory, D::Kind, D::Kind, String) {
		(
			self.category(),
			self.input_kind(),
			self.output_kind(),
			self.name().to_string(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testutil::*;

	fn boxed(tasks: &[&dyn Task<Value, NullContext>]) -> Vec<Box<dyn Task<Value, NullContext>>> {
		tasks.iter().map(|t| t.clone_task()).collect()
	}

	#[test]
	fn can_follow_matches_kinds() {
		let emit = EmitNumber::new(1);
		let add = AddOne::new();
		let text = NumberToText::new();

		// A task can follow another iff the other's output is its input.
		for a in boxed(&[&emit, &add, &text]) {
			for b in boxed(&[&emit, &add, &text]) {
				assert_eq!(
					a.can_follow(b.as_ref()),
					b.output_kind() == a.input_kind(),
				);
			}
		}

		assert!(add.can_follow(&emit));
		assert!(text.can_follow(&add));
		assert!(!emit.can_follow(&add));
		assert!(!add.can_follow(&text));
	}

	#[test]
	fn accepts_matches_input_kind() {
		let add = AddOne::new();
		assert!(add.accepts(ValueKind::Number));
		assert!(!add.accepts(ValueKind::Text));
		assert!(!add.accepts(ValueKind::None));
	}

	#[test]
	fn only_sourceless_tasks_start_a_pipeline() {
		let emit = EmitNumber::new(1);
		let add = AddOne::new();

		assert!(emit.can_insert_between(None, None));
		assert!(!add.can_insert_between(None, None));

		// `next` still has to line up when the slot is at the front.
		assert!(emit.can_insert_between(None, Some(&add)));
		let text = NumberToText::new();
		assert!(!text.can_insert_between(None, Some(&add)));
	}

	#[test]
	fn insert_checks_both_neighbors() {
		let emit = EmitNumber::new(1);
		let add = AddOne::new();
		let text = NumberToText::new();
		let shout = TextUpper::new();

		// emit → [add] → text
		assert!(add.can_insert_between(Some(&emit), Some(&text)));
		// emit → [text] → shout
		assert!(text.can_insert_between(Some(&emit), Some(&shout)));
		// emit → [shout] → ... : shout eats text, emit makes numbers
		assert!(!shout.can_insert_between(Some(&emit), None));
		// anything may sit at the end if its input lines up
		assert!(text.can_insert_between(Some(&add), None));
	}

	#[test]
	fn fits_between_is_exact() {
		let text = NumberToText::new();
		assert!(text.fits_between(ValueKind::Number, ValueKind::Text));
		assert!(!text.fits_between(ValueKind::Number, ValueKind::Number));
		assert!(!text.fits_between(ValueKind::Text, ValueKind::Text));
	}

	#[test]
	fn sort_key_groups_by_category_then_name() {
		let emit = EmitNumber::new(1);
		let add = AddOne::new();
		let double = DoubleNumber::new();

		// Input sorts before Filter...
		assert!(emit.sort_key() < add.sort_key());
		// ...and within Filter, names break the tie.
		assert!(add.sort_key() < double.sort_key());
	}
}
