//! File formats for scan data, and the save/load tasks built on them.
//!
//! Each format module is a self-contained codec over [`std::io`] streams:
//! [`stl`] and [`obj`] for triangle meshes, [`ply`] for both, and [`xyz`]
//! for raw point clouds. The [`tasks`] module wraps them in pipeline tasks
//! that resolve their target path through the host's
//! [`SavePrompt`](lathe_scan::context::SavePrompt) when none is configured.

#![warn(missing_docs)]

pub mod obj;
pub mod ply;
pub mod stl;
pub mod tasks;
pub mod xyz;

pub use tasks::register;
