//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the calibration curve and the calendar grid it induces
//! - per-age range samples (`RangeSample`)
//! - aggregated output rows (`ResultRow`) and validated run input (`RunConfig`)

pub mod types;

pub use types::*;
