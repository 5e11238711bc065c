//! Engine configuration
//!
//! Loaded once at startup (JSON), validated into an [`crate::IcebergEngine`]
//! and immutable afterwards. Every field has a default matching the
//! dashboard's stock look, so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::rank::{RankTier, default_tiers};

/// Sinusoid constants for the idle animation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillationParams {
    /// Vertical bob amplitude (scene units)
    pub vertical_amplitude: f32,
    /// Vertical bob angular frequency (rad per time unit)
    pub vertical_frequency: f64,
    /// Horizontal sway amplitude (scene units)
    pub horizontal_amplitude: f32,
    pub horizontal_frequency: f64,
    /// Phase lead of the sway relative to the bob (radians)
    pub horizontal_phase: f64,
    /// Light modulation amplitude (opacity units)
    pub light_amplitude: f32,
    pub light_frequency: f64,
    /// Wave phase advance per time unit
    pub wave_speed: f64,
}

impl Default for OscillationParams {
    fn default() -> Self {
        Self {
            vertical_amplitude: 5.0,
            vertical_frequency: 0.9,
            horizontal_amplitude: 2.5,
            horizontal_frequency: 0.7,
            horizontal_phase: 1.5,
            light_amplitude: 0.15,
            light_frequency: 1.2,
            wave_speed: 1.8,
        }
    }
}

impl OscillationParams {
    /// Parameters with every amplitude zeroed and the waves frozen
    pub fn still() -> Self {
        Self {
            vertical_amplitude: 0.0,
            horizontal_amplitude: 0.0,
            light_amplitude: 0.0,
            wave_speed: 0.0,
            ..Self::default()
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IcebergConfig {
    // === Points ===
    /// Total at which the iceberg reaches 100%
    pub max_points: u64,
    /// Total used until the first fetch completes, and when it yields nothing
    pub default_points: u64,
    /// Tier table, ascending by threshold
    pub ranks: Vec<RankTier>,

    // === Visible fraction remap ===
    /// Fraction above water at 0%
    pub fraction_baseline: f32,
    /// Fraction gained per percent of progress
    pub fraction_scale: f32,

    // === Scene geometry ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Y coordinate of the water surface
    pub waterline_y: f32,
    /// Height of the whole iceberg in scene units
    pub total_height: f32,
    /// Height reported in the stats panel for the whole iceberg (metres)
    pub real_height: f32,
    /// Distance of the percentage label above the peak
    pub label_margin: f32,
    /// Smallest y the label may take
    pub label_floor: f32,

    // === Animation ===
    /// Wall-clock interval between ticks (milliseconds)
    pub tick_interval_ms: u32,
    /// Animation time added per tick
    pub time_step: f64,
    pub oscillation: OscillationParams,

    // === Accessibility ===
    /// Reduced motion (no bobbing, no shimmer, frozen waves)
    pub reduced_motion: bool,
}

impl Default for IcebergConfig {
    fn default() -> Self {
        Self {
            max_points: MAX_POINTS,
            default_points: 0,
            ranks: default_tiers(),

            fraction_baseline: FRACTION_BASELINE,
            fraction_scale: FRACTION_SCALE,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            waterline_y: WATERLINE_Y,
            total_height: ICEBERG_HEIGHT,
            real_height: 600.0,
            label_margin: 30.0,
            label_floor: 50.0,

            tick_interval_ms: TICK_INTERVAL_MS,
            time_step: TIME_STEP,
            oscillation: OscillationParams::default(),

            reduced_motion: false,
        }
    }
}

impl IcebergConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded iceberg config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Lowest visible fraction the remap can produce
    pub fn min_fraction(&self) -> f32 {
        self.fraction_baseline
    }

    /// Highest visible fraction the remap can produce
    pub fn max_fraction(&self) -> f32 {
        self.fraction_baseline + 100.0 * self.fraction_scale
    }

    /// Oscillation constants after applying reduced motion
    pub fn effective_oscillation(&self) -> OscillationParams {
        if self.reduced_motion {
            OscillationParams::still()
        } else {
            self.oscillation
        }
    }

    /// Check every numeric invariant. The ladder is checked by
    /// [`crate::RankLadder::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_points == 0 {
            return Err(ConfigError::ZeroCap);
        }

        positive("viewport_width", self.viewport_width as f64)?;
        positive("viewport_height", self.viewport_height as f64)?;
        positive("total_height", self.total_height as f64)?;
        positive("real_height", self.real_height as f64)?;
        positive("time_step", self.time_step)?;
        positive("tick_interval_ms", self.tick_interval_ms as f64)?;

        finite("label_margin", self.label_margin as f64)?;
        finite("label_floor", self.label_floor as f64)?;
        finite("fraction_baseline", self.fraction_baseline as f64)?;
        finite("fraction_scale", self.fraction_scale as f64)?;

        let osc = &self.oscillation;
        for (field, value) in [
            ("oscillation.vertical_amplitude", osc.vertical_amplitude as f64),
            ("oscillation.vertical_frequency", osc.vertical_frequency),
            ("oscillation.horizontal_amplitude", osc.horizontal_amplitude as f64),
            ("oscillation.horizontal_frequency", osc.horizontal_frequency),
            ("oscillation.horizontal_phase", osc.horizontal_phase),
            ("oscillation.light_amplitude", osc.light_amplitude as f64),
            ("oscillation.light_frequency", osc.light_frequency),
            ("oscillation.wave_speed", osc.wave_speed),
        ] {
            finite(field, value)?;
        }

        if !(self.waterline_y > 0.0 && self.waterline_y < self.viewport_height) {
            return Err(ConfigError::WaterlineOutsideViewport {
                waterline_y: self.waterline_y,
                viewport_height: self.viewport_height,
            });
        }

        let (min, max) = (self.min_fraction(), self.max_fraction());
        if self.fraction_scale < 0.0 || min <= 0.0 || max >= 100.0 {
            return Err(ConfigError::FractionBounds { min, max });
        }

        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = IcebergConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_fraction(), 15.0);
        assert!((config.max_fraction() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = IcebergConfig::from_json_str(r#"{ "max_points": 5000, "oscillation": { "wave_speed": 2.0 } }"#)
            .unwrap();
        assert_eq!(config.max_points, 5000);
        assert_eq!(config.waterline_y, 450.0);
        assert_eq!(config.oscillation.wave_speed, 2.0);
        assert_eq!(config.oscillation.vertical_amplitude, 5.0);
        assert_eq!(config.ranks.len(), default_tiers().len());
    }

    #[test]
    fn test_json_round_trip_preserves_ranks() {
        let config = IcebergConfig::default();
        let json = config.to_json().unwrap();
        let back = IcebergConfig::from_json_str(&json).unwrap();
        assert_eq!(back.ranks, config.ranks);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(
            IcebergConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            IcebergConfig::load("/nonexistent/iceberg.json"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = IcebergConfig {
            max_points: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCap)));

        let config = IcebergConfig {
            total_height: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "total_height", .. })
        ));

        let config = IcebergConfig {
            waterline_y: 900.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WaterlineOutsideViewport { .. })
        ));

        // 20 + 100 * 0.8 = 100 would fully emerge the iceberg
        let config = IcebergConfig {
            fraction_baseline: 20.0,
            fraction_scale: 0.8,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::FractionBounds { .. })));

        let config = IcebergConfig {
            fraction_baseline: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::FractionBounds { .. })));

        let config = IcebergConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "tick_interval_ms", .. })
        ));

        let mut config = IcebergConfig::default();
        config.oscillation.light_frequency = f64::NAN;
        assert!(matches!(config.validate(), Err(ConfigError::NonFinite { .. })));
    }

    #[test]
    fn test_reduced_motion_stills_oscillation() {
        let config = IcebergConfig {
            reduced_motion: true,
            ..Default::default()
        };
        let osc = config.effective_oscillation();
        assert_eq!(osc.vertical_amplitude, 0.0);
        assert_eq!(osc.horizontal_amplitude, 0.0);
        assert_eq!(osc.light_amplitude, 0.0);
        assert_eq!(osc.wave_speed, 0.0);
    }
}
