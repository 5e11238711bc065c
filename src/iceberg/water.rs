//! Water surface: wave strokes and the shimmer at the waterline
//!
//! Everything here is driven by the wave phase alone. The water never moves
//! with the point total.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mesh::PlacedEllipse;
use crate::renderer::colors::{SKY_500, WAVE_CREST, WHITE};

/// Static description of one wave stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveStroke {
    /// Phase lead over the shared wave phase
    pub phase_offset: f64,
    /// Horizontal swing of the first control point
    pub sway: f32,
    /// Vertical swing of the first control point
    pub lift: f32,
    /// Distance below the waterline
    pub depth: f32,
    pub color: [f32; 4],
    pub width: f32,
    pub opacity: f32,
}

/// Crest, highlight, then three submerged ripples
pub const WAVE_STROKES: [WaveStroke; 5] = [
    WaveStroke {
        phase_offset: 0.0,
        sway: 15.0,
        lift: 2.0,
        depth: 0.0,
        color: WAVE_CREST,
        width: 3.0,
        opacity: 0.8,
    },
    WaveStroke {
        phase_offset: 0.5,
        sway: 12.0,
        lift: 1.5,
        depth: 0.0,
        color: WHITE,
        width: 1.5,
        opacity: 0.5,
    },
    ripple(1),
    ripple(2),
    ripple(3),
];

const fn ripple(i: u8) -> WaveStroke {
    let i = i as f32;
    WaveStroke {
        phase_offset: 0.3 * i as f64,
        sway: 10.0,
        lift: 1.0,
        depth: 8.0 * i,
        color: SKY_500,
        width: 1.5,
        opacity: 0.3 - 0.07 * i,
    }
}

/// A stroke for one frame: `M 0 y  Q c, w/4 y  T w/2 y  T 3w/4 y  T w y`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WavePath {
    /// Y of every on-curve point
    pub baseline: f32,
    /// Horizontal extent
    pub span: f32,
    /// Control point of the first quadratic segment
    pub control: Vec2,
    pub color: [f32; 4],
    pub stroke_width: f32,
    pub opacity: f32,
}

/// Number of quadratic segments in a wave path
pub const WAVE_SEGMENTS: usize = 4;

impl WavePath {
    pub fn new(stroke: &WaveStroke, waterline_y: f32, span: f32, wave_phase: f64) -> Self {
        let swing = (wave_phase + stroke.phase_offset).sin() as f32;
        let baseline = waterline_y + stroke.depth;
        Self {
            baseline,
            span,
            control: Vec2::new(span / 8.0 + swing * stroke.sway, baseline - swing * stroke.lift),
            color: stroke.color,
            stroke_width: stroke.width,
            opacity: stroke.opacity,
        }
    }

    /// `(start, control, end)` per segment; later control points are the
    /// reflection of the previous one through the shared end point
    pub fn segments(&self) -> [(Vec2, Vec2, Vec2); WAVE_SEGMENTS] {
        let step = self.span / WAVE_SEGMENTS as f32;
        let mut control = self.control;
        std::array::from_fn(|i| {
            let start = Vec2::new(step * i as f32, self.baseline);
            let end = Vec2::new(step * (i + 1) as f32, self.baseline);
            if i > 0 {
                control = 2.0 * start - control;
            }
            (start, control, end)
        })
    }

    /// Polyline approximation with `per_segment` steps per quadratic
    pub fn sample(&self, per_segment: usize) -> Vec<Vec2> {
        let per_segment = per_segment.max(1);
        let mut points = Vec::with_capacity(WAVE_SEGMENTS * per_segment + 1);
        points.push(Vec2::new(0.0, self.baseline));
        for (start, control, end) in self.segments() {
            for step in 1..=per_segment {
                let t = step as f32 / per_segment as f32;
                let u = 1.0 - t;
                points.push(start * (u * u) + control * (2.0 * u * t) + end * (t * t));
            }
        }
        points
    }

    /// SVG path data for DOM renderers
    pub fn svg_path(&self) -> String {
        let step = self.span / WAVE_SEGMENTS as f32;
        let y = self.baseline;
        let mut d = format!(
            "M 0 {y} Q {} {}, {} {y}",
            self.control.x, self.control.y, step
        );
        for i in 2..=WAVE_SEGMENTS {
            d.push_str(&format!(" T {} {y}", step * i as f32));
        }
        d
    }
}

/// All wave strokes for one frame
pub fn wave_paths(waterline_y: f32, span: f32, wave_phase: f64) -> Vec<WavePath> {
    WAVE_STROKES
        .iter()
        .map(|stroke| WavePath::new(stroke, waterline_y, span, wave_phase))
        .collect()
}

/// Opacity of the shimmer group
pub const DISTORTION_GROUP_OPACITY: f32 = 0.15;

/// Three flat shimmering ellipses straddling the waterline
pub fn distortion_bands(waterline_y: f32, span: f32, wave_phase: f64) -> Vec<PlacedEllipse> {
    (0..3)
        .map(|i| {
            let fi = i as f64;
            let cx = span / 2.0 + (wave_phase + fi).sin() as f32 * 30.0;
            let rx = 150.0 + (wave_phase * 1.3 + fi * 0.7).sin() as f32 * 20.0;
            PlacedEllipse {
                center: Vec2::new(cx, waterline_y - 10.0 + 7.0 * i as f32),
                radii: Vec2::new(rx, 8.0),
                color: WHITE,
                opacity: (0.3 - 0.1 * i as f32) * DISTORTION_GROUP_OPACITY,
            }
        })
        .collect()
}
