//! Anchor-relative iceberg mesh
//!
//! The iceberg is a fixed table of triangles whose vertices are offsets from
//! a single anchor: the peak, horizontally centred. Offsets are in mesh units
//! (native height [`MESH_HEIGHT`]); placement scales them to the configured
//! height, adds the anchor and the bob translation, and never regenerates the
//! table. Which triangles show is decided only by the region clip rects.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::oscillation::OscillationVector;
use crate::renderer::colors::*;

/// Height of the mesh table from peak to keel, in mesh units
pub const MESH_HEIGHT: f32 = 600.0;

/// Clip region a facet is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    AboveWater,
    BelowWater,
}

impl Region {
    /// Opacity applied to the whole region group
    pub fn opacity(&self) -> f32 {
        match self {
            Region::AboveWater => 1.0,
            Region::BelowWater => 0.95,
        }
    }
}

/// Direction of a linear gradient across a facet's bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientDirection {
    /// Top-left to bottom-right
    Diagonal,
    /// Top-right to bottom-left
    AntiDiagonal,
}

/// Facet fill
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Fill {
    Solid([f32; 4]),
    Linear {
        from: [f32; 4],
        to: [f32; 4],
        direction: GradientDirection,
    },
}

/// One triangle of the mesh table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    /// Vertex offsets from the anchor
    pub points: [Vec2; 3],
    pub fill: Fill,
    pub stroke: [f32; 4],
    pub stroke_width: f32,
    /// Opacity with no light modulation
    pub opacity: f32,
    /// How strongly `light_shift` modulates the opacity
    pub light_gain: f32,
}

impl Facet {
    const fn new(points: [Vec2; 3], fill: Fill, stroke: [f32; 4]) -> Self {
        Self {
            points,
            fill,
            stroke,
            stroke_width: 1.5,
            opacity: 1.0,
            light_gain: 0.0,
        }
    }

    const fn lit(self, opacity: f32, light_gain: f32) -> Self {
        Self {
            opacity,
            light_gain,
            ..self
        }
    }

    const fn thin(self) -> Self {
        Self {
            stroke_width: 1.0,
            ..self
        }
    }

    /// Opacity after light modulation, clamped to [0, 1]
    pub fn opacity_at(&self, light_shift: f32) -> f32 {
        (self.opacity + light_shift * self.light_gain).clamp(0.0, 1.0)
    }

    /// Unsigned area in mesh units
    pub fn area(&self) -> f32 {
        let [a, b, c] = self.points;
        (b - a).perp_dot(c - a).abs() * 0.5
    }
}

const fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

const fn solid(color: [f32; 4]) -> Fill {
    Fill::Solid(color)
}

const ICE_LIGHT_1: Fill = Fill::Linear {
    from: SKY_50,
    to: SKY_200,
    direction: GradientDirection::Diagonal,
};
const ICE_LIGHT_2: Fill = Fill::Linear {
    from: SKY_100,
    to: SKY_300,
    direction: GradientDirection::Diagonal,
};
const ICE_LIGHT_3: Fill = Fill::Linear {
    from: BLUE_100,
    to: BLUE_300,
    direction: GradientDirection::AntiDiagonal,
};
const ICE_DARK_1: Fill = Fill::Linear {
    from: DEEP_4,
    to: DEEP_1,
    direction: GradientDirection::Diagonal,
};
const ICE_DARK_2: Fill = Fill::Linear {
    from: DEEP_6,
    to: DEEP_4,
    direction: GradientDirection::Diagonal,
};
const ICE_DARK_3: Fill = Fill::Linear {
    from: DEEP_5,
    to: DEEP_2,
    direction: GradientDirection::AntiDiagonal,
};

/// Sunlit tip, drawn above the waterline
pub const ABOVE_WATER: [Facet; 24] = [
    // Peak
    Facet::new([v(0.0, 0.0), v(-20.0, 80.0), v(0.0, 120.0)], solid(WHITE), SKY_100).lit(0.95, 0.2),
    Facet::new([v(0.0, 0.0), v(20.0, 80.0), v(0.0, 120.0)], solid(SKY_50), BLUE_100).lit(0.9, 0.15),
    // Left shoulder
    Facet::new([v(0.0, 0.0), v(-60.0, 60.0), v(-20.0, 80.0)], ICE_LIGHT_2, SKY_300).lit(0.95, 0.0),
    Facet::new([v(-60.0, 60.0), v(-100.0, 120.0), v(-20.0, 80.0)], solid(SKY_200), SKY_400).lit(0.9, 0.25),
    // Right shoulder
    Facet::new([v(0.0, 0.0), v(60.0, 60.0), v(20.0, 80.0)], ICE_LIGHT_1, SKY_200).lit(0.98, 0.0),
    Facet::new([v(60.0, 60.0), v(100.0, 120.0), v(20.0, 80.0)], ICE_LIGHT_3, SKY_300).lit(0.95, 0.3),
    // Left flank
    Facet::new([v(-100.0, 120.0), v(-140.0, 200.0), v(-80.0, 180.0)], solid(SKY_300), SKY_400),
    Facet::new([v(-100.0, 120.0), v(-80.0, 180.0), v(-20.0, 80.0)], solid(BLUE_300), BLUE_400).lit(0.85, 0.2),
    Facet::new([v(-100.0, 120.0), v(0.0, 120.0), v(-20.0, 80.0)], solid(SKY_200), SKY_300),
    // Right flank
    Facet::new([v(100.0, 120.0), v(140.0, 200.0), v(80.0, 180.0)], solid(BLUE_100), BLUE_300),
    Facet::new([v(100.0, 120.0), v(80.0, 180.0), v(20.0, 80.0)], ICE_LIGHT_1, SKY_200).lit(0.9, 0.25),
    Facet::new([v(100.0, 120.0), v(0.0, 120.0), v(20.0, 80.0)], solid(SKY_100), SKY_200),
    // Left base
    Facet::new([v(-140.0, 200.0), v(-160.0, 280.0), v(-120.0, 200.0)], solid(SKY_400), SKY_500),
    Facet::new([v(-120.0, 200.0), v(-80.0, 180.0), v(0.0, 240.0)], solid(BLUE_400), BLUE_500).lit(0.9, 0.0),
    Facet::new([v(-120.0, 200.0), v(0.0, 240.0), v(-140.0, 200.0)], solid(SKY_300), SKY_400),
    // Right base
    Facet::new([v(140.0, 200.0), v(160.0, 280.0), v(120.0, 200.0)], solid(BLUE_300), BLUE_400),
    Facet::new([v(120.0, 200.0), v(80.0, 180.0), v(0.0, 240.0)], solid(SKY_200), SKY_300).lit(0.95, 0.2),
    Facet::new([v(120.0, 200.0), v(0.0, 240.0), v(140.0, 200.0)], solid(BLUE_100), BLUE_300),
    // Core
    Facet::new([v(0.0, 120.0), v(-80.0, 180.0), v(0.0, 240.0)], solid(SKY_300), SKY_400),
    Facet::new([v(0.0, 120.0), v(80.0, 180.0), v(0.0, 240.0)], solid(BLUE_300), BLUE_400),
    // Skirt
    Facet::new([v(-160.0, 280.0), v(-140.0, 200.0), v(-120.0, 200.0)], solid(SKY_500), SKY_600),
    Facet::new([v(-120.0, 200.0), v(0.0, 300.0), v(-140.0, 200.0)], solid(SKY_400), SKY_500),
    Facet::new([v(160.0, 280.0), v(140.0, 200.0), v(120.0, 200.0)], solid(BLUE_400), BLUE_500),
    Facet::new([v(120.0, 200.0), v(0.0, 300.0), v(140.0, 200.0)], solid(SKY_300), SKY_400),
];

/// Dark keel, drawn below the waterline
pub const BELOW_WATER: [Facet; 10] = [
    // Keel
    Facet::new([v(0.0, 300.0), v(-150.0, 450.0), v(0.0, 600.0)], ICE_DARK_1, DEEP_0),
    Facet::new([v(0.0, 300.0), v(150.0, 450.0), v(0.0, 600.0)], ICE_DARK_2, DEEP_1),
    // Left wing
    Facet::new([v(-120.0, 200.0), v(-200.0, 350.0), v(-150.0, 450.0)], solid(DEEP_4), DEEP_2),
    Facet::new([v(-120.0, 200.0), v(-150.0, 450.0), v(0.0, 300.0)], solid(DEEP_6), DEEP_4).lit(0.9, 0.3),
    // Right wing
    Facet::new([v(120.0, 200.0), v(200.0, 350.0), v(150.0, 450.0)], solid(DEEP_5), DEEP_3),
    Facet::new([v(120.0, 200.0), v(150.0, 450.0), v(0.0, 300.0)], ICE_DARK_3, DEEP_2).lit(0.85, 0.2),
    // Lower flanks
    Facet::new([v(-200.0, 350.0), v(-150.0, 450.0), v(0.0, 600.0)], solid(DEEP_2), DEEP_0),
    Facet::new([v(200.0, 350.0), v(150.0, 450.0), v(0.0, 600.0)], solid(DEEP_4), DEEP_1),
    // Ridges
    Facet::new([v(-120.0, 200.0), v(-200.0, 350.0), v(-170.0, 250.0)], solid(DEEP_5), DEEP_3).thin(),
    Facet::new([v(120.0, 200.0), v(200.0, 350.0), v(170.0, 250.0)], solid(DEEP_6), DEEP_4).thin(),
];

/// Table for a region
pub fn facets(region: Region) -> &'static [Facet] {
    match region {
        Region::AboveWater => &ABOVE_WATER,
        Region::BelowWater => &BELOW_WATER,
    }
}

/// A facet in scene coordinates for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedFacet {
    pub points: [Vec2; 3],
    pub fill: Fill,
    pub stroke: [f32; 4],
    pub stroke_width: f32,
    /// Facet opacity after light modulation, excluding the region opacity
    pub opacity: f32,
    pub region: Region,
}

/// Scene position of a mesh offset
#[inline]
pub fn place_point(offset: Vec2, anchor: Vec2, scale: f32, bob: Vec2) -> Vec2 {
    anchor + offset * scale + bob
}

/// Place every facet of `region` for one frame
pub fn place_region(
    region: Region,
    anchor: Vec2,
    scale: f32,
    osc: &OscillationVector,
) -> Vec<PlacedFacet> {
    let bob = osc.bob();
    facets(region)
        .iter()
        .map(|facet| PlacedFacet {
            points: facet.points.map(|p| place_point(p, anchor, scale, bob)),
            fill: facet.fill,
            stroke: facet.stroke,
            stroke_width: facet.stroke_width * scale,
            opacity: facet.opacity_at(osc.light_shift),
            region,
        })
        .collect()
}

/// Translucent glint riding on the mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub offset: Vec2,
    pub radii: Vec2,
    pub color: [f32; 4],
    pub opacity: f32,
}

pub const HIGHLIGHTS: [Highlight; 2] = [
    Highlight {
        offset: v(20.0, 60.0),
        radii: v(25.0, 30.0),
        color: WHITE,
        opacity: 0.5,
    },
    Highlight {
        offset: v(-10.0, 140.0),
        radii: v(20.0, 25.0),
        color: SKY_50,
        opacity: 0.4,
    },
];

/// Ellipse in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedEllipse {
    pub center: Vec2,
    pub radii: Vec2,
    pub color: [f32; 4],
    pub opacity: f32,
}

/// Place the highlights; group opacity follows the light shift
pub fn place_highlights(anchor: Vec2, scale: f32, osc: &OscillationVector) -> Vec<PlacedEllipse> {
    let group = (0.6 + osc.light_shift * 0.4).clamp(0.0, 1.0);
    let bob = osc.bob();
    HIGHLIGHTS
        .iter()
        .map(|h| PlacedEllipse {
            center: place_point(h.offset, anchor, scale, bob),
            radii: h.radii * scale,
            color: h.color,
            opacity: h.opacity * group,
        })
        .collect()
}
