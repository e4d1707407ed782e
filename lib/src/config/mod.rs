//! Configuration for the clipping layer.
//!
//! The geometry operations take their parameters explicitly. This module holds
//! the few knobs that shape how the layer runs rather than what it computes:
//! diagnostics thresholds and the parallel union partitioning.

mod clipper_config;

pub use clipper_config::ClipperConfig;
