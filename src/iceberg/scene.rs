//! Per-frame scene handed to the renderer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::mesh::{PlacedEllipse, PlacedFacet};
use super::water::WavePath;

/// Axis-aligned clip rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ClipRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// The two fixed clip rects split at the waterline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    pub above: ClipRect,
    pub below: ClipRect,
}

impl ClipBounds {
    pub fn at_waterline(waterline_y: f32, viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            above: ClipRect::new(0.0, 0.0, viewport_width, waterline_y),
            below: ClipRect::new(0.0, waterline_y, viewport_width, viewport_height - waterline_y),
        }
    }
}

/// The "NN%" label floating above the peak
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentLabel {
    pub position: Vec2,
    pub text: String,
}

impl PercentLabel {
    /// Label for `percentage`, `margin` above the bobbing peak and never
    /// higher than `floor`
    pub fn new(percentage: f32, center_x: f32, peak_y: f32, vertical_bob: f32, margin: f32, floor: f32) -> Self {
        Self {
            position: Vec2::new(center_x, (peak_y - margin + vertical_bob).max(floor)),
            // Ties round up
            text: format!("{:.0}%", percentage.round()),
        }
    }
}

/// Everything the renderer draws for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub clip: ClipBounds,
    /// Facets clipped to `clip.above`
    pub above: Vec<PlacedFacet>,
    /// Facets clipped to `clip.below`
    pub below: Vec<PlacedFacet>,
    pub highlights: Vec<PlacedEllipse>,
    pub distortion: Vec<PlacedEllipse>,
    pub waves: Vec<WavePath>,
    pub label: PercentLabel,
}
