//! Output generation for a finished run.
//!
//! # Submodules
//!
//! - [`json`]: writes the [`AggregateReport`](crate::models::AggregateReport) to disk
//! - [`summary`]: renders the end-of-run console summary

pub mod json;
pub mod summary;
