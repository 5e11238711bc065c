//! Error types
//!
//! Configuration problems are fatal and surface once, when the engine is
//! built. Fetch problems are always recovered by the dashboard driver.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid engine configuration detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The rank ladder has no tiers.
    #[error("rank ladder requires at least one tier")]
    EmptyLadder,
    /// The lowest tier does not start at zero points.
    #[error("first rank tier `{name}` must start at 0 points, found {min_points}")]
    FirstTierNotZero { name: String, min_points: u64 },
    /// Thresholds are not strictly increasing.
    #[error("rank tier `{name}` at {min_points} points does not exceed the previous threshold {previous}")]
    UnsortedLadder {
        name: String,
        min_points: u64,
        previous: u64,
    },
    /// Two tiers share a display name.
    #[error("rank tier name `{0}` appears more than once")]
    DuplicateTier(String),
    /// The point cap must be positive.
    #[error("max_points must be greater than zero")]
    ZeroCap,
    /// A length, step or size was zero, negative or not finite.
    #[error("{field} must be finite and greater than zero, found {value}")]
    NonPositive { field: &'static str, value: f64 },
    /// A constant was NaN or infinite.
    #[error("{field} must be finite, found {value}")]
    NonFinite { field: &'static str, value: f64 },
    /// The waterline does not split the viewport into two non-empty regions.
    #[error("waterline_y {waterline_y} must lie strictly inside the viewport height {viewport_height}")]
    WaterlineOutsideViewport {
        waterline_y: f32,
        viewport_height: f32,
    },
    /// The visible-fraction remap can reach fully submerged or fully emerged.
    #[error("visible fraction range [{min}, {max}] must lie strictly between 0 and 100")]
    FractionBounds { min: f32, max: f32 },
    /// The config file could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config text is not valid JSON for [`crate::IcebergConfig`].
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure reported by the upstream portfolio service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be completed.
    #[error("portfolio request failed: {0}")]
    Transport(String),
    /// The service answered with something that is not a portfolio.
    #[error("portfolio response was malformed: {0}")]
    Malformed(String),
    /// The user session is missing or expired.
    #[error("not authenticated")]
    Unauthenticated,
}
