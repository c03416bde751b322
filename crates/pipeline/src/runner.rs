//! Running pipelines

use crossbeam::channel::{unbounded, Receiver, Sender};
use std::{error::Error, sync::Arc, thread::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
	api::{JobContext, TaskData, TaskStatus},
	errors::TaskError,
	pipeline::Pipeline,
	progress::{CancelFlag, Progress},
};

/// What one task slot looked like when a job ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRunState {
	/// Where this task's lifecycle ended up
	pub status: TaskStatus,

	/// Last reported completion, `0..=100`
	pub percent: u8,

	/// The error message, if this task failed
	pub error: Option<String>,
}

impl TaskRunState {
	fn new() -> Self {
		Self {
			status: TaskStatus::NotStarted,
			percent: 0,
			error: None,
		}
	}
}

/// Something that happened while a job was running.
/// `task` indexes into the pipeline's task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEvent {
	/// The task this event is about
	pub task: usize,

	/// What happened
	pub kind: JobEventKind,
}

/// The kinds of [`JobEvent`] a job emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEventKind {
	/// This task started running
	TaskStarted,

	/// This task reported new completion
	Percent(u8),

	/// This task finished without error
	TaskFinished,

	/// This task failed, with this message. The job stops here.
	TaskFailed(String),
}

/// Everything we know about a finished job
#[derive(Debug)]
pub struct JobReport<D: TaskData> {
	/// One entry per task in the pipeline, in pipeline order
	pub states: Vec<TaskRunState>,

	/// The last task's output, if every task finished
	pub output: Option<D>,
}

impl<D: TaskData> JobReport<D> {
	/// Did every task finish?
	pub fn is_success(&self) -> bool {
		self.states.iter().all(|s| s.status.is_finished())
	}

	/// The first failed slot, if any
	pub fn first_failure(&self) -> Option<(usize, &TaskRunState)> {
		self.states
			.iter()
			.enumerate()
			.find(|(_, s)| s.status.is_failed())
	}
}

/// Render a task error as the one-line message users see.
/// One level of source is included when there is one.
fn error_message(error: &TaskError) -> String {
	match error.source() {
		Some(source) => format!("{error}: {source}"),
		None => error.to_string(),
	}
}

fn send_event(events: Option<&Sender<JobEvent>>, task: usize, kind: JobEventKind) {
	if let Some(tx) = events {
		tx.send(JobEvent { task, kind }).ok();
	}
}

fn fail(state: &mut TaskRunState, events: Option<&Sender<JobEvent>>, idx: usize, message: String) {
	state.status = TaskStatus::Failed;
	state.error = Some(message.clone());
	send_event(events, idx, JobEventKind::TaskFailed(message));
}

/// Run every task in `pipeline` over `input`, in order, on the calling thread.
///
/// Task slots are reset first. Each task gets the previous task's output;
/// the first gets `input`. A task whose input kind doesn't match the data
/// it was handed fails with an "unsupported data" message without being
/// run, and any task failure stops the job: later slots stay
/// [`TaskStatus::NotStarted`] and the report carries no output.
///
/// Starts, new percent values, finishes, and failures are sent through
/// `events` as they happen; the returned [`JobReport`] says the same
/// things after the fact.
pub fn run_job<D: TaskData, C: JobContext>(
	pipeline: &mut Pipeline<D, C>,
	input: D,
	ctx: &C,
	events: Option<&Sender<JobEvent>>,
	cancel: CancelFlag,
) -> JobReport<D> {
	let mut states: Vec<TaskRunState> =
		pipeline.tasks.iter().map(|_| TaskRunState::new()).collect();

	info!(
		message = "Starting job",
		pipeline = %pipeline.name,
		n_tasks = states.len()
	);

	let mut data = input;

	for idx in 0..pipeline.tasks.len() {
		// Between-task cancellation point. A cancel that lands here is
		// attributed to the task that would have run next.
		if cancel.is_cancelled() {
			warn!(message = "Job cancelled", pipeline = %pipeline.name, next_task = idx);
			fail(
				&mut states[idx],
				events,
				idx,
				error_message(&TaskError::Cancelled),
			);
			return JobReport {
				states,
				output: None,
			};
		}

		let task = &mut pipeline.tasks[idx];

		states[idx].status = TaskStatus::Running;
		states[idx].percent = 0;
		send_event(events, idx, JobEventKind::TaskStarted);
		debug!(message = "Running task", index = idx, task = task.name());

		if !task.accepts(data.kind()) {
			warn!(
				message = "Task cannot consume its input",
				index = idx,
				task = task.name(),
				kind = %data.kind()
			);
			let error = TaskError::UnsupportedData(data.kind().to_string());
			fail(&mut states[idx], events, idx, error_message(&error));
			return JobReport {
				states,
				output: None,
			};
		}

		let result = {
			let percent_slot = &mut states[idx].percent;
			let mut sink = |pct: u8| {
				*percent_slot = pct;
				if let Some(tx) = events {
					tx.send(JobEvent {
						task: idx,
						kind: JobEventKind::Percent(pct),
					})
					.ok();
				}
			};

			let mut progress = Progress::with_sink(cancel.clone(), &mut sink);
			let result = task.run(ctx, data, &mut progress);

			// Drive the slot to 100 through the reporter, so a sink
			// sees the final edge exactly once.
			if result.is_ok() {
				progress.set(100);
			}
			result
		};

		match result {
			Ok(out) => {
				states[idx].status = TaskStatus::Finished;
				send_event(events, idx, JobEventKind::TaskFinished);
				data = out;
			}
			Err(error) => {
				let msg = error_message(&error);
				warn!(
					message = "Task failed",
					index = idx,
					task = pipeline.tasks[idx].name(),
					error = msg.as_str()
				);
				fail(&mut states[idx], events, idx, msg);
				return JobReport {
					states,
					output: None,
				};
			}
		}
	}

	info!(message = "Job finished", pipeline = %pipeline.name);
	return JobReport {
		states,
		output: Some(data),
	};
}

/// A job running on a background worker thread
pub struct JobHandle<D: TaskData, C: JobContext> {
	events: Receiver<JobEvent>,
	cancel: CancelFlag,
	join: JoinHandle<(Pipeline<D, C>, JobReport<D>)>,
}

impl<D: TaskData, C: JobContext> JobHandle<D, C> {
	/// The event stream of this job, in the order things happened
	pub fn events(&self) -> &Receiver<JobEvent> {
		&self.events
	}

	/// Ask the job to stop at its next cancellation point
	pub fn cancel(&self) {
		self.cancel.cancel();
	}

	/// The job's cancel flag
	pub fn cancel_flag(&self) -> CancelFlag {
		self.cancel.clone()
	}

	/// Block until the job ends, getting the pipeline back along with
	/// the report.
	pub fn wait(self) -> (Pipeline<D, C>, JobReport<D>) {
		match self.join.join() {
			Ok(x) => x,
			Err(panic) => std::panic::resume_unwind(panic),
		}
	}
}

/// Run a job on a single background worker thread.
///
/// Events stream through the returned handle while the job runs;
/// [`JobHandle::wait`] hands the pipeline back once it's done.
pub fn spawn_job<D: TaskData, C: JobContext>(
	mut pipeline: Pipeline<D, C>,
	input: D,
	ctx: Arc<C>,
) -> JobHandle<D, C> {
	let (send_events, receive_events) = unbounded();
	let cancel = CancelFlag::new();

	let join = {
		let cancel = cancel.clone();
		std::thread::spawn(move || {
			let report = run_job(&mut pipeline, input, ctx.as_ref(), Some(&send_events), cancel);
			(pipeline, report)
		})
	};

	return JobHandle {
		events: receive_events,
		cancel,
		join,
	};
}
