//! Mathematical utilities: calibration likelihood, interpolation, weighted percentiles.

pub mod gaussian;
pub mod interp;
pub mod percentile;

pub use gaussian::*;
pub use interp::*;
pub use percentile::*;
