//! Configuration error types.
//!
//! The estimator, allocator and sampler never fail; these errors only arise
//! when a tuned heuristic table is internally inconsistent.

use thiserror::Error;

/// Errors found while validating a [`StrategyConfig`](crate::config::StrategyConfig).
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The hour lookup table has no steps.
    #[error("hour_steps must contain at least one step")]
    EmptyHourSteps,

    /// Step thresholds must be listed from highest to lowest.
    #[error("hour_steps must be strictly descending by min_percent (step {index})")]
    UnorderedHourSteps { index: usize },

    /// A step (or the base figure) has a non-positive hour requirement.
    #[error("study hours must be positive, got {0}")]
    NonPositiveHours(f64),

    /// The fallback clamp range is inverted.
    #[error("fallback_min ({min}) must not exceed fallback_max ({max})")]
    InvertedFallbackRange { min: f64, max: f64 },

    /// The effort floor must be a fraction in (0, 1].
    #[error("effort_floor_fraction must be in (0, 1], got {0}")]
    EffortFloorOutOfRange(f64),

    /// Ratio thresholds must satisfy `severe < ok < high`.
    #[error("ratio thresholds must satisfy severe ({severe}) < ok ({ok}) < high ({high})")]
    UnorderedRatios { severe: f64, ok: f64, high: f64 },

    /// An unknown allocation method name.
    #[error("unknown allocation method: {0}")]
    UnknownAllocationMethod(String),
}
