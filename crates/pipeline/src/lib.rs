//! A small sequential pipeline engine for scan-processing tasks.
//!
//! Everything here is generic over the payload: [`api::TaskData`] tags
//! payloads with an [`api::DataKind`], tasks declare the kinds they consume
//! and produce, and [`runner::run_job`] carries one payload through a
//! [`pipeline::Pipeline`] front to back.
//!
//! The scan payload and every real task live in other crates; this one only
//! knows about kinds, order, and run state.

#![warn(missing_docs)]

pub mod api;
pub mod errors;
pub mod labels;
pub mod pipeline;
pub mod progress;
pub mod registry;
pub mod runner;
pub mod settings;
pub mod spec;

#[cfg(test)]
mod testutil;
