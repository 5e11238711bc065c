//! Time-only animation perturbations
//!
//! Each component is an independent sinusoid of the animation clock. None of
//! them reads the point total.

use serde::{Deserialize, Serialize};

use crate::config::OscillationParams;

/// Cosmetic offsets for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OscillationVector {
    /// Added to every mesh y coordinate
    pub vertical_bob: f32,
    /// Added to every mesh x coordinate
    pub horizontal_bob: f32,
    /// Added (scaled per facet) to facet opacities
    pub light_shift: f32,
    /// Unbounded phase driving the wave paths
    pub wave_phase: f64,
}

impl OscillationVector {
    /// Translation applied to the whole mesh
    #[inline]
    pub fn bob(&self) -> glam::Vec2 {
        glam::Vec2::new(self.horizontal_bob, self.vertical_bob)
    }
}

/// Evaluate the oscillators at `time`
pub fn oscillate(time: f64, params: &OscillationParams) -> OscillationVector {
    OscillationVector {
        vertical_bob: (params.vertical_frequency * time).sin() as f32 * params.vertical_amplitude,
        horizontal_bob: (params.horizontal_frequency * time + params.horizontal_phase).sin() as f32
            * params.horizontal_amplitude,
        light_shift: (params.light_frequency * time).sin() as f32 * params.light_amplitude,
        wave_phase: params.wave_speed * time,
    }
}
