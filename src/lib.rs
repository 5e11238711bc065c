//! Tethys Iceberg - rank progression and the achievement iceberg
//!
//! Core modules:
//! - `rank`: Tier ladder and point-total classification
//! - `iceberg`: Layout engine (percentage, waterline anchor, mesh, oscillation)
//! - `dashboard`: Explicit state and the tick / total-change frame driver
//! - `renderer`: Vertex generation for the host renderer
//! - `config`: Data-driven engine configuration

pub mod config;
pub mod dashboard;
pub mod error;
pub mod iceberg;
pub mod rank;
pub mod renderer;

pub use config::{IcebergConfig, OscillationParams};
pub use dashboard::{Dashboard, DashboardState, FetchOutcome, FetchTicket, Frame, PointsState, PortfolioSnapshot};
pub use error::{ConfigError, FetchError};
pub use iceberg::{IcebergEngine, IcebergStats, OscillationVector, Scene, VisualState};
pub use rank::{Milestone, RankLadder, RankProgress, RankTier, classify};

/// Stock dashboard constants
pub mod consts {
    /// Points at which the iceberg is fully raised
    pub const MAX_POINTS: u64 = 3000;

    /// Visible fraction at 0 points (percent above water)
    pub const FRACTION_BASELINE: f32 = 15.0;
    /// Visible fraction gained per percent of progress
    pub const FRACTION_SCALE: f32 = 0.35;

    /// Scene dimensions (SVG-style, y down)
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 900.0;
    pub const WATERLINE_Y: f32 = 450.0;
    pub const ICEBERG_HEIGHT: f32 = 600.0;

    /// Tick source: 16 ms wall clock, 0.016 animation time units
    pub const TICK_INTERVAL_MS: u32 = 16;
    pub const TIME_STEP: f64 = 0.016;
}
