//! Batch generation
//!
//! This module runs a full mail merge off the caller's task:
//!
//! - [`controller`] - spawns the worker and returns a [`BatchHandle`]
//! - [`job`] - the per-run binding of template, rows and destination
//! - [`progress`] - batch state machine and progress channel
//! - [`summary`] - report of a completed run

pub mod controller;
pub mod job;
pub mod progress;
pub mod summary;

pub use controller::{BatchController, BatchHandle, BatchOptions};
pub use job::GenerationJob;
pub use progress::{percent_complete, BatchState, ProgressSnapshot, ProgressTracker};
pub use summary::BatchSummary;
