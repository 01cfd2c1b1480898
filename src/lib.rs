//! `res14c` library crate.
//!
//! Estimates how precisely a radiocarbon measurement can place a sample in
//! calendar time. The binary (`res14c`) is a thin wrapper around this library so
//! that:
//!
//! - the calibration engine is testable without spawning processes
//! - other front-ends can drive it through [`progress::ProgressSink`]

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod progress;
pub mod report;
pub mod sampling;

pub use app::pipeline::calc_ranges;
pub use error::Res14cError;
