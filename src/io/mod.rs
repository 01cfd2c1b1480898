//! Input/output helpers.
//!
//! - calibration curve loading (`curve`)
//! - result exports (CSV/JSON) (`export`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;
