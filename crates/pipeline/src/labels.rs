//! Label types for pipelines

use serde::Deserialize;
use smartstring::{LazyCompact, SmartString};
use std::fmt::Display;

/// A pipeline's name
#[derive(Debug, Hash, PartialEq, Eq, Clone, Deserialize, PartialOrd, Ord)]
pub struct PipelineName(SmartString<LazyCompact>);

impl Display for PipelineName {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl AsRef<str> for PipelineName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<SmartString<LazyCompact>> for PipelineName {
	fn from(s: SmartString<LazyCompact>) -> Self {
		PipelineName(s)
	}
}

impl From<PipelineName> for SmartString<LazyCompact> {
	fn from(value: PipelineName) -> Self {
		value.0
	}
}

impl From<&PipelineName> for SmartString<LazyCompact> {
	fn from(value: &PipelineName) -> Self {
		value.0.clone()
	}
}

impl From<&str> for PipelineName {
	fn from(s: &str) -> Self {
		PipelineName(s.into())
	}
}

impl From<String> for PipelineName {
	fn from(s: String) -> Self {
		PipelineName(s.into())
	}
}

impl<'a> From<&'a PipelineName> for &'a str {
	fn from(value: &'a PipelineName) -> Self {
		&value.0
	}
}
