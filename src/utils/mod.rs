//! Utility helpers.

pub mod parallel;

pub use parallel::{parallelism_enabled, set_parallelism, ParallelismGuard};
