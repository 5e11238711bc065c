//! Validated engine tying the ladder and the layout formulas together

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::{VisualState, visible_fraction, visible_percentage, waterline_offset};
use super::mesh::{MESH_HEIGHT, Region, place_highlights, place_region};
use super::oscillation::{OscillationVector, oscillate};
use super::scene::{ClipBounds, PercentLabel, Scene};
use super::water::{distortion_bands, wave_paths};
use crate::config::{IcebergConfig, OscillationParams};
use crate::error::ConfigError;
use crate::rank::{Milestone, RankLadder, RankProgress};

/// Numeric read-outs shown beside the iceberg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IcebergStats {
    pub above_water_percent: f32,
    pub below_water_percent: f32,
    /// Display height above water (metres)
    pub above_water_height: f32,
    /// Display depth below water (metres)
    pub below_water_height: f32,
    pub total_height: f32,
    /// Points left until the cap, never negative
    pub points_to_cap: u64,
}

/// Immutable engine built once from a validated config
#[derive(Debug, Clone)]
pub struct IcebergEngine {
    config: IcebergConfig,
    ladder: RankLadder,
    oscillation: OscillationParams,
}

impl IcebergEngine {
    /// Validate `config` and build the engine
    pub fn new(config: IcebergConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ladder = RankLadder::new(config.ranks.clone())?;
        let oscillation = config.effective_oscillation();

        log::info!(
            "Iceberg engine ready: cap {} pts, {} ranks, fraction {:.1}..{:.1}%{}",
            config.max_points,
            ladder.tiers().len(),
            config.min_fraction(),
            config.max_fraction(),
            if config.reduced_motion { ", reduced motion" } else { "" }
        );

        Ok(Self {
            config,
            ladder,
            oscillation,
        })
    }

    pub fn config(&self) -> &IcebergConfig {
        &self.config
    }

    pub fn ladder(&self) -> &RankLadder {
        &self.ladder
    }

    pub fn rank(&self, total: u64) -> RankProgress {
        self.ladder.classify(total)
    }

    pub fn milestones(&self, total: u64) -> Vec<Milestone> {
        self.ladder.milestones(total)
    }

    pub fn percentage(&self, total: i64) -> f32 {
        visible_percentage(total, self.config.max_points)
    }

    pub fn fraction(&self, percent: f32) -> f32 {
        visible_fraction(percent, self.config.fraction_baseline, self.config.fraction_scale)
            .clamp(self.config.min_fraction(), self.config.max_fraction())
    }

    /// Peak y for a visible fraction
    pub fn peak_y(&self, fraction: f32) -> f32 {
        waterline_offset(fraction, self.config.total_height, self.config.waterline_y)
    }

    pub fn oscillation(&self, time: f64) -> OscillationVector {
        oscillate(time, &self.oscillation)
    }

    /// Derived state for `(total, time)`; the two inputs never mix
    pub fn visual_state(&self, total: i64, time: f64) -> VisualState {
        let percentage = self.percentage(total);
        let visible_fraction = self.fraction(percentage);
        VisualState {
            percentage,
            visible_fraction,
            waterline_offset: self.peak_y(visible_fraction),
            oscillation: self.oscillation(time),
        }
    }

    pub fn stats(&self, total: i64, visual: &VisualState) -> IcebergStats {
        let real = self.config.real_height;
        let above = visual.visible_fraction;
        let below = visual.submerged_fraction();
        let cap = self.config.max_points;
        let points_to_cap = if total <= 0 {
            cap
        } else {
            cap.saturating_sub(total as u64)
        };
        IcebergStats {
            above_water_percent: above,
            below_water_percent: below,
            above_water_height: above / 100.0 * real,
            below_water_height: below / 100.0 * real,
            total_height: real,
            points_to_cap,
        }
    }

    /// Mesh units to scene units
    pub fn mesh_scale(&self) -> f32 {
        self.config.total_height / MESH_HEIGHT
    }

    /// Mesh anchor (peak, horizontally centred) before oscillation
    pub fn anchor(&self, visual: &VisualState) -> Vec2 {
        Vec2::new(self.config.viewport_width / 2.0, visual.waterline_offset)
    }

    pub fn clip_bounds(&self) -> ClipBounds {
        ClipBounds::at_waterline(
            self.config.waterline_y,
            self.config.viewport_width,
            self.config.viewport_height,
        )
    }

    /// Lay out everything the renderer draws for `visual`
    pub fn scene(&self, visual: &VisualState) -> Scene {
        let cfg = &self.config;
        let osc = &visual.oscillation;
        let anchor = self.anchor(visual);
        let scale = self.mesh_scale();

        Scene {
            clip: self.clip_bounds(),
            above: place_region(Region::AboveWater, anchor, scale, osc),
            below: place_region(Region::BelowWater, anchor, scale, osc),
            highlights: place_highlights(anchor, scale, osc),
            distortion: distortion_bands(cfg.waterline_y, cfg.viewport_width, osc.wave_phase),
            waves: wave_paths(cfg.waterline_y, cfg.viewport_width, osc.wave_phase),
            label: PercentLabel::new(
                visual.percentage,
                anchor.x,
                visual.waterline_offset,
                osc.vertical_bob,
                cfg.label_margin,
                cfg.label_floor,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::RankTier;

    fn engine() -> IcebergEngine {
        IcebergEngine::new(IcebergConfig::default()).unwrap()
    }

    #[test]
    fn test_zero_points_keeps_sliver() {
        let engine = engine();
        let visual = engine.visual_state(0, 0.0);
        assert_eq!(visual.percentage, 0.0);
        assert_eq!(visual.visible_fraction, 15.0);
        assert!((visual.waterline_offset - 360.0).abs() < 1e-4);
    }

    #[test]
    fn test_capped_points() {
        let engine = engine();
        for total in [3000, 4000, 1_000_000] {
            let visual = engine.visual_state(total, 5.0);
            assert_eq!(visual.percentage, 100.0);
            assert!(visual.visible_fraction < 100.0);
            assert!((visual.waterline_offset - 150.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_time_does_not_move_layout() {
        let engine = engine();
        let a = engine.visual_state(1234, 0.0);
        let b = engine.visual_state(1234, 987.6);
        assert_eq!(a.percentage, b.percentage);
        assert_eq!(a.visible_fraction, b.visible_fraction);
        assert_eq!(a.waterline_offset, b.waterline_offset);
    }

    #[test]
    fn test_points_do_not_move_oscillation() {
        let engine = engine();
        assert_eq!(
            engine.visual_state(0, 3.3).oscillation,
            engine.visual_state(2999, 3.3).oscillation
        );
    }

    #[test]
    fn test_stats() {
        let engine = engine();
        let visual = engine.visual_state(1500, 0.0);
        let stats = engine.stats(1500, &visual);
        // 15 + 50 * 0.35 = 32.5
        assert!((stats.above_water_percent - 32.5).abs() < 1e-4);
        assert!((stats.below_water_percent - 67.5).abs() < 1e-4);
        assert!((stats.above_water_height - 195.0).abs() < 1e-3);
        assert!((stats.above_water_height + stats.below_water_height - 600.0).abs() < 1e-3);
        assert_eq!(stats.points_to_cap, 1500);
        assert_eq!(engine.stats(5000, &visual).points_to_cap, 0);
        assert_eq!(engine.stats(-5, &visual).points_to_cap, 3000);
    }

    #[test]
    fn test_scene_layout() {
        let engine = engine();
        let visual = engine.visual_state(0, 0.0);
        let scene = engine.scene(&visual);
        assert_eq!(scene.above.len(), 24);
        assert_eq!(scene.below.len(), 10);
        assert_eq!(scene.highlights.len(), 2);
        assert_eq!(scene.waves.len(), 5);
        assert_eq!(scene.distortion.len(), 3);
        assert_eq!(scene.clip.above.height, 450.0);
        // Peak vertex sits at the anchor plus the sway at t = 0
        let peak = scene.above[0].points[0];
        assert!((peak.x - (400.0 + visual.oscillation.horizontal_bob)).abs() < 1e-4);
        assert!((peak.y - 360.0).abs() < 1e-4);
        assert_eq!(scene.label.text, "0%");
    }

    #[test]
    fn test_label_at_half_percent_totals() {
        let engine = engine();
        for (total, text) in [(15, "1%"), (75, "3%"), (375, "13%"), (1875, "63%")] {
            let scene = engine.scene(&engine.visual_state(total, 0.0));
            assert_eq!(scene.label.text, text);
        }
    }

    #[test]
    fn test_mesh_scales_with_height() {
        let engine = IcebergEngine::new(IcebergConfig {
            total_height: 300.0,
            waterline_y: 300.0,
            reduced_motion: true,
            ..Default::default()
        })
        .unwrap();
        let visual = engine.visual_state(0, 0.0);
        let scene = engine.scene(&visual);
        // Keel bottom: peak + 600 mesh units * 0.5
        let keel = scene.below[0].points[2];
        assert!((keel.y - (visual.waterline_offset + 300.0)).abs() < 1e-3);
        assert_eq!(keel.x, 400.0);
    }

    #[test]
    fn test_rejects_bad_ladder() {
        let config = IcebergConfig {
            ranks: vec![RankTier::new("A", 0), RankTier::new("B", 0)],
            ..Default::default()
        };
        assert!(matches!(
            IcebergEngine::new(config),
            Err(ConfigError::UnsortedLadder { .. })
        ));
    }
}
