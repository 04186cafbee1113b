//! Engine configuration.

pub mod thresholds;
