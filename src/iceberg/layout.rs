//! Points → percentage → visible fraction → waterline anchor
//!
//! Pure, time-independent formulas. Each output depends only on the point
//! total and fixed configuration.

use serde::{Deserialize, Serialize};

use super::oscillation::OscillationVector;

/// Share of the cap reached by `total`, clamped to [0, 100].
///
/// Negative totals read as 0 and totals at or above the cap saturate at 100.
#[inline]
pub fn visible_percentage(total: i64, cap: u64) -> f32 {
    if cap == 0 {
        return 0.0;
    }
    let ratio = (total as f64 / cap as f64).clamp(0.0, 1.0);
    (ratio * 100.0) as f32
}

/// Remap a percentage into the display range `[baseline, baseline + 100 * scale]`
#[inline]
pub fn visible_fraction(percent: f32, baseline: f32, scale: f32) -> f32 {
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };
    baseline + percent * scale
}

/// Y coordinate of the iceberg peak for a given visible fraction.
///
/// All mesh vertices hang off this single anchor.
#[inline]
pub fn waterline_offset(fraction: f32, total_height: f32, waterline_y: f32) -> f32 {
    waterline_y - (fraction / 100.0) * total_height
}

/// Per-frame derived state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    /// Achievement percentage in [0, 100]
    pub percentage: f32,
    /// Share of the iceberg drawn above water, within the display bounds
    pub visible_fraction: f32,
    /// Peak y coordinate before oscillation
    pub waterline_offset: f32,
    pub oscillation: OscillationVector,
}

impl VisualState {
    /// Share of the iceberg drawn below water
    pub fn submerged_fraction(&self) -> f32 {
        100.0 - self.visible_fraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_saturates() {
        assert_eq!(visible_percentage(3000, 3000), 100.0);
        assert_eq!(visible_percentage(4000, 3000), 100.0);
        assert_eq!(visible_percentage(i64::MAX, 3000), 100.0);
        assert_eq!(visible_percentage(1500, 3000), 50.0);
    }

    #[test]
    fn test_percentage_negative_is_zero() {
        assert_eq!(visible_percentage(-10, 3000), 0.0);
        assert_eq!(visible_percentage(i64::MIN, 3000), 0.0);
        assert_eq!(visible_percentage(0, 3000), 0.0);
    }

    #[test]
    fn test_fraction_keeps_sliver() {
        assert_eq!(visible_fraction(0.0, 15.0, 0.35), 15.0);
        assert!((visible_fraction(100.0, 15.0, 0.35) - 50.0).abs() < 1e-4);
        // Out-of-range input is clamped before the remap
        assert_eq!(visible_fraction(-20.0, 15.0, 0.35), 15.0);
        assert!((visible_fraction(250.0, 15.0, 0.35) - 50.0).abs() < 1e-4);
        assert_eq!(visible_fraction(f32::NAN, 15.0, 0.35), 15.0);
    }

    #[test]
    fn test_waterline_offset() {
        // 15% of 600 above a waterline at 450
        assert!((waterline_offset(15.0, 600.0, 450.0) - 360.0).abs() < 1e-4);
        assert!((waterline_offset(50.0, 600.0, 450.0) - 150.0).abs() < 1e-4);
    }
}
