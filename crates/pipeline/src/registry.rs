//! The task registry: every task type a host can build

use itertools::Itertools;
use smartstring::{LazyCompact, SmartString};
use std::collections::BTreeMap;

use crate::{
	api::{JobContext, Task, TaskCategory, TaskData},
	errors::RegistryError,
};

/// Palette metadata for one registered task type.
/// Everything a host needs to list the type without building it.
#[derive(Debug, Clone)]
pub struct PaletteEntry<K> {
	/// The stable identifier tasks of this type report
	pub type_name: &'static str,

	/// The display name
	pub name: SmartString<LazyCompact>,

	/// The palette group
	pub category: TaskCategory,

	/// The kind tasks of this type consume
	pub input: K,

	/// The kind tasks of this type produce
	pub output: K,
}

/// A task type we've registered inside a [`TaskRegistry`]
struct RegisteredTask<D: TaskData, C: JobContext> {
	/// Builds a new task of this type with default settings
	make: fn() -> Box<dyn Task<D, C>>,

	/// What this type looks like in a palette listing
	entry: PaletteEntry<D::Kind>,
}

/// A factory for every task type a host knows about.
///
/// Hosts fill one of these at startup from each task crate's `register`
/// function, then build tasks by type name when assembling pipelines.
pub struct TaskRegistry<D: TaskData, C: JobContext> {
	tasks: BTreeMap<SmartString<LazyCompact>, RegisteredTask<D, C>>,
}

impl<D: TaskData, C: JobContext> TaskRegistry<D, C> {
	/// Make an empty registry
	pub fn new() -> Self {
		Self {
			tasks: BTreeMap::new(),
		}
	}

	/// Register a task type.
	///
	/// `make` builds an instance with default settings. Palette metadata is
	/// read from one such instance right away, so registration is also a
	/// cheap sanity check of the type's descriptive methods.
	pub fn register(&mut self, make: fn() -> Box<dyn Task<D, C>>) -> Result<(), RegistryError> {
		let probe = make();
		let type_name = probe.type_name();

		if self.tasks.contains_key(type_name) {
			return Err(RegistryError::DuplicateTaskType(type_name.into()));
		}

		let entry = PaletteEntry {
			type_name,
			name: probe.name().into(),
			category: probe.category(),
			input: probe.input_kind(),
			output: probe.output_kind(),
		};

		self.tasks
			.insert(type_name.into(), RegisteredTask { make, entry });
		return Ok(());
	}

	/// Do we know about the given task type?
	pub fn has_task(&self, type_name: &str) -> bool {
		self.tasks.contains_key(type_name)
	}

	/// Build a task with default settings.
	/// Returns `None` if `type_name` isn't registered.
	pub fn make_task(&self, type_name: &str) -> Option<Box<dyn Task<D, C>>> {
		self.tasks.get(type_name).map(|t| (t.make)())
	}

	/// How many task types are registered?
	pub fn len(&self) -> usize {
		self.tasks.len()
	}

	/// Is this registry empty?
	pub fn is_empty(&self) -> bool {
		self.tasks.is_empty()
	}

	/// Iterate palette entries in palette order:
	/// category, then input kind, then output kind, then display name.
	pub fn palette(&self) -> impl Iterator<Item = &PaletteEntry<D::Kind>> {
		self.tasks
			.values()
			.map(|t| &t.entry)
			.sorted_by_key(|e| (e.category, e.input, e.output, e.name.clone()))
	}
}
