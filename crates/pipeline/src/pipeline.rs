//! A pipeline: tasks in a row

use itertools::Itertools;

use crate::{
	api::{DataKind, JobContext, Task, TaskData},
	errors::PipelineBuildError,
	labels::PipelineName,
};

/// An ordered list of tasks, run front to back.
///
/// Two invariants hold for every pipeline: the first task consumes nothing
/// (its input kind is the "no data" kind), and every adjacent pair agrees
/// on the kind flowing between them. [`Pipeline::push_task`] and
/// [`Pipeline::insert_task`] refuse edits that would break them;
/// [`Pipeline::validate`] re-checks a whole pipeline at once.
pub struct Pipeline<D: TaskData, C: JobContext> {
	/// This pipeline's name
	pub name: PipelineName,

	pub(crate) tasks: Vec<Box<dyn Task<D, C>>>,
}

impl<D: TaskData, C: JobContext> Pipeline<D, C> {
	/// Make an empty pipeline
	pub fn new(name: PipelineName) -> Self {
		Self {
			name,
			tasks: Vec::new(),
		}
	}

	/// The tasks in this pipeline, front to back
	pub fn tasks(&self) -> &[Box<dyn Task<D, C>>] {
		&self.tasks
	}

	/// How many tasks does this pipeline have?
	pub fn len(&self) -> usize {
		self.tasks.len()
	}

	/// Does this pipeline have no tasks?
	pub fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}

	/// Add a task to the end of this pipeline
	pub fn push_task(&mut self, task: Box<dyn Task<D, C>>) -> Result<(), PipelineBuildError> {
		self.insert_task(self.tasks.len(), task)
	}

	/// Insert a task at `index`, checking the seam on each side.
	///
	/// # Panics
	/// Panics if `index > self.len()`.
	pub fn insert_task(
		&mut self,
		index: usize,
		task: Box<dyn Task<D, C>>,
	) -> Result<(), PipelineBuildError> {
		assert!(index <= self.tasks.len());

		let prev = index.checked_sub(1).map(|i| &self.tasks[i]);
		let next = self.tasks.get(index);

		match prev {
			None => {
				if !task.input_kind().is_none() {
					return Err(PipelineBuildError::BadHead {
						task: task.name().into(),
						input: task.input_kind().to_string(),
					});
				}
			}
			Some(prev) => {
				if prev.output_kind() != task.input_kind() {
					return Err(PipelineBuildError::KindMismatch {
						prev: prev.name().into(),
						prev_out: prev.output_kind().to_string(),
						next: task.name().into(),
						next_in: task.input_kind().to_string(),
					});
				}
			}
		}

		if let Some(next) = next {
			if task.output_kind() != next.input_kind() {
				return Err(PipelineBuildError::KindMismatch {
					prev: task.name().into(),
					prev_out: task.output_kind().to_string(),
					next: next.name().into(),
					next_in: next.input_kind().to_string(),
				});
			}
		}

		self.tasks.insert(index, task);
		return Ok(());
	}

	/// Remove and return the task at `index`.
	///
	/// The hole this leaves must close cleanly: removal fails with a
	/// [`PipelineBuildError`] if the neighbors don't line up afterwards.
	///
	/// # Panics
	/// Panics if `index >= self.len()`.
	pub fn remove_task(&mut self, index: usize) -> Result<Box<dyn Task<D, C>>, PipelineBuildError> {
		assert!(index < self.tasks.len());

		let prev = index.checked_sub(1).map(|i| &self.tasks[i]);
		let next = self.tasks.get(index + 1);

		match (prev, next) {
			(_, None) => {}
			(None, Some(next)) => {
				if !next.input_kind().is_none() {
					return Err(PipelineBuildError::BadHead {
						task: next.name().into(),
						input: next.input_kind().to_string(),
					});
				}
			}
			(Some(prev), Some(next)) => {
				if prev.output_kind() != next.input_kind() {
					return Err(PipelineBuildError::KindMismatch {
						prev: prev.name().into(),
						prev_out: prev.output_kind().to_string(),
						next: next.name().into(),
						next_in: next.input_kind().to_string(),
					});
				}
			}
		}

		return Ok(self.tasks.remove(index));
	}

	/// Check the whole pipeline: the head consumes nothing, and every
	/// adjacent pair agrees. Pipelines edited only through this type's
	/// methods are always valid; this is for hosts that assemble task
	/// lists some other way.
	pub fn validate(&self) -> Result<(), PipelineBuildError> {
		if let Some(head) = self.tasks.first() {
			if !head.input_kind().is_none() {
				return Err(PipelineBuildError::BadHead {
					task: head.name().into(),
					input: head.input_kind().to_string(),
				});
			}
		}

		for (prev, next) in self.tasks.iter().tuple_windows() {
			if prev.output_kind() != next.input_kind() {
				return Err(PipelineBuildError::KindMismatch {
					prev: prev.name().into(),
					prev_out: prev.output_kind().to_string(),
					next: next.name().into(),
					next_in: next.input_kind().to_string(),
				});
			}
		}

		return Ok(());
	}
}
