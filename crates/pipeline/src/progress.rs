//! Progress reporting and cooperative cancellation

use std::sync::{
	atomic::{AtomicBool, Ordering},
	Arc,
};

/// A cooperative cancel flag shared by everyone involved in a job.
///
/// Cancellation is polite: tasks poll [`CancelFlag::is_cancelled`] inside
/// long loops and bail out with a "cancelled" error, and the runner checks
/// the flag between tasks. Nothing is interrupted mid-write.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
	/// Make a new, unset flag
	pub fn new() -> Self {
		Self(Arc::new(AtomicBool::new(false)))
	}

	/// Ask everyone holding this flag to stop
	pub fn cancel(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	/// Has someone asked us to stop?
	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// The progress reporter handed to a running task.
///
/// Tracks the slot's completion percent and forwards *changes* to a sink:
/// setting the value it already has fires nothing. The runner starts every
/// slot at zero, so a task's own `set(0)` is never reported either.
pub struct Progress<'a> {
	percent: u8,
	sink: Option<&'a mut dyn FnMut(u8)>,
	cancel: CancelFlag,
}

impl<'a> Progress<'a> {
	/// Make a reporter with no sink. Progress is still tracked.
	pub fn new(cancel: CancelFlag) -> Self {
		Self {
			percent: 0,
			sink: None,
			cancel,
		}
	}

	/// Make a reporter that forwards each new percent value to `sink`
	pub fn with_sink(cancel: CancelFlag, sink: &'a mut dyn FnMut(u8)) -> Self {
		Self {
			percent: 0,
			sink: Some(sink),
			cancel,
		}
	}

	/// The last percent value set
	pub fn percent(&self) -> u8 {
		self.percent
	}

	/// Set completion to `percent`, clamped to 100.
	/// The sink fires only when the value actually changes.
	pub fn set(&mut self, percent: u8) {
		let percent = percent.min(100);
		if percent == self.percent {
			return;
		}

		self.percent = percent;
		if let Some(sink) = &mut self.sink {
			sink(percent);
		}
	}

	/// Set completion to `done` out of `total` work units.
	/// No work at all counts as complete.
	pub fn set_fraction(&mut self, done: usize, total: usize) {
		if total == 0 {
			self.set(100);
		} else {
			self.set(((done * 100) / total) as u8);
		}
	}

	/// The job's cancel flag
	pub fn cancel_flag(&self) -> &CancelFlag {
		&self.cancel
	}

	/// Has this job been asked to stop?
	pub fn is_cancelled(&self) -> bool {
		self.cancel.is_cancelled()
	}
}
