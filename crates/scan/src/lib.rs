//! The scan payload, the scan job context, and tasks that reshape
//! raw scan lines.
//!
//! This crate pins down the generic engine for scanning work:
//! [`data::ScanData`] is the payload every scan pipeline carries, and
//! [`context::ScanContext`] is what tasks can see while they run. File
//! formats and save tasks live in their own crate.

#![warn(missing_docs)]

pub mod context;
pub mod data;
pub mod tasks;

pub use tasks::register;
