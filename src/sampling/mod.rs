//! Range sampling: per-age evaluation and the worker pool that drives it.

pub mod range;
pub mod sampler;

pub use range::{calibrated_distribution, get_range, interval_bounds};
pub use sampler::{WorkQueue, sample_ranges};
