//! Triangle-list generation for scene primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, mix, with_alpha};
use crate::iceberg::{ClipRect, Fill, GradientDirection, PlacedEllipse, PlacedFacet, Scene};

/// Gradient parameter of `p` inside the box `min..max`
fn gradient_t(p: Vec2, min: Vec2, max: Vec2, direction: GradientDirection) -> f32 {
    let size = max - min;
    let u = if size.x > 0.0 { (p.x - min.x) / size.x } else { 0.0 };
    let v = if size.y > 0.0 { (p.y - min.y) / size.y } else { 0.0 };
    let u = match direction {
        GradientDirection::Diagonal => u,
        GradientDirection::AntiDiagonal => 1.0 - u,
    };
    ((u + v) * 0.5).clamp(0.0, 1.0)
}

/// Filled triangle for a placed facet, gradient evaluated per vertex
pub fn facet_vertices(facet: &PlacedFacet) -> [Vertex; 3] {
    let alpha = facet.opacity * facet.region.opacity();
    let min = facet.points[0].min(facet.points[1]).min(facet.points[2]);
    let max = facet.points[0].max(facet.points[1]).max(facet.points[2]);

    facet.points.map(|p| {
        let color = match facet.fill {
            Fill::Solid(color) => color,
            Fill::Linear {
                from,
                to,
                direction,
            } => mix(from, to, gradient_t(p, min, max, direction)),
        };
        Vertex::new(p.x, p.y, with_alpha(color, alpha))
    })
}

/// Closed outline of a placed facet
pub fn facet_outline(facet: &PlacedFacet) -> Vec<Vertex> {
    let [a, b, c] = facet.points;
    let alpha = facet.opacity * facet.region.opacity();
    polyline_strip(&[a, b, c, a], facet.stroke_width, with_alpha(facet.stroke, alpha))
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Ellipse with its opacity folded into the color
pub fn placed_ellipse(e: &PlacedEllipse, segments: u32) -> Vec<Vertex> {
    ellipse(e.center, e.radii, with_alpha(e.color, e.opacity), segments)
}

/// Generate a constant-width quad strip along a polyline
pub fn polyline_strip(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width * 0.5;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);

        // Direction from p1 to p2
        let dir = (p2 - p1).normalize_or_zero();
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x);

        // Quad corners
        let v1a = p1 + perp * half;
        let v1b = p1 - perp * half;
        let v2a = p2 + perp * half;
        let v2b = p2 - perp * half;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
}

/// Axis-aligned quad with a vertical color ramp
pub fn vertical_gradient_rect(rect: ClipRect, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (rect.x, rect.y);
    let (x1, y1) = (rect.x + rect.width, rect.bottom());
    vec![
        Vertex::new(x0, y0, top),
        Vertex::new(x1, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y0, top),
        Vertex::new(x1, y1, bottom),
    ]
}

/// Sky-to-seabed backdrop: stops at 0, 45, 55 and 100% of the height
pub fn backdrop(width: f32, height: f32) -> Vec<Vertex> {
    let stops = [
        (0.0, colors::SKY_300),
        (0.45, colors::SKY_400),
        (0.55, colors::SKY_500),
        (1.0, colors::OCEAN_FLOOR),
    ];
    stops
        .windows(2)
        .flat_map(|pair| {
            let (t0, c0) = pair[0];
            let (t1, c1) = pair[1];
            let rect = ClipRect::new(0.0, t0 * height, width, (t1 - t0) * height);
            vertical_gradient_rect(rect, c0, c1)
        })
        .collect()
}

/// Wave polyline samples per quadratic segment
pub const WAVE_SAMPLES: usize = 12;
/// Triangle fan segments per ellipse
pub const ELLIPSE_SEGMENTS: u32 = 32;

/// Triangle lists for one frame, grouped by clip region and draw order
#[derive(Debug, Clone)]
pub struct SceneVertices {
    /// Unclipped, drawn first
    pub backdrop: Vec<Vertex>,
    /// Unclipped, drawn under the iceberg
    pub shimmer: Vec<Vertex>,
    /// Scissor to `clip.below`
    pub below: Vec<Vertex>,
    /// Scissor to `clip.above`
    pub above: Vec<Vertex>,
    /// Unclipped highlights and waves, drawn last
    pub overlay: Vec<Vertex>,
    pub clip_above: ClipRect,
    pub clip_below: ClipRect,
}

impl SceneVertices {
    pub fn build(scene: &Scene, viewport_width: f32, viewport_height: f32) -> Self {
        let region = |facets: &[PlacedFacet]| {
            let mut out: Vec<Vertex> = facets.iter().flat_map(facet_vertices).collect();
            out.extend(facets.iter().flat_map(facet_outline));
            out
        };

        let mut overlay: Vec<Vertex> = scene
            .highlights
            .iter()
            .flat_map(|h| placed_ellipse(h, ELLIPSE_SEGMENTS))
            .collect();
        for wave in &scene.waves {
            let color = with_alpha(wave.color, wave.opacity);
            overlay.extend(polyline_strip(&wave.sample(WAVE_SAMPLES), wave.stroke_width, color));
        }

        Self {
            backdrop: backdrop(viewport_width, viewport_height),
            shimmer: scene
                .distortion
                .iter()
                .flat_map(|e| placed_ellipse(e, ELLIPSE_SEGMENTS))
                .collect(),
            below: region(scene.below.as_slice()),
            above: region(scene.above.as_slice()),
            overlay,
            clip_above: scene.clip.above,
            clip_below: scene.clip.below,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.backdrop.len() + self.shimmer.len() + self.below.len() + self.above.len() + self.overlay.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iceberg::Region;

    fn facet(fill: Fill) -> PlacedFacet {
        PlacedFacet {
            points: [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)],
            fill,
            stroke: colors::WHITE,
            stroke_width: 1.5,
            opacity: 0.5,
            region: Region::BelowWater,
        }
    }

    #[test]
    fn test_facet_solid_alpha() {
        let verts = facet_vertices(&facet(Fill::Solid(colors::WHITE)));
        for v in verts {
            assert!((v.color[3] - 0.5 * 0.95).abs() < 1e-6);
        }
        assert_eq!(verts[2].position, [10.0, 10.0]);
    }

    #[test]
    fn test_facet_gradient_ends() {
        let black = [0.0, 0.0, 0.0, 1.0];
        let verts = facet_vertices(&facet(Fill::Linear {
            from: black,
            to: colors::WHITE,
            direction: GradientDirection::Diagonal,
        }));
        // Top-left corner gets `from`, bottom-right gets `to`
        assert_eq!(verts[0].color[0], 0.0);
        assert!((verts[2].color[0] - 1.0).abs() < 1e-6);
        // Top-right is halfway
        assert!((verts[1].color[0] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ellipse_vertex_count() {
        let verts = ellipse(Vec2::ZERO, Vec2::new(20.0, 10.0), colors::WHITE, 16);
        assert_eq!(verts.len(), 48);
        let max_y = verts.iter().map(|v| v.position[1].abs()).fold(0.0, f32::max);
        assert!(max_y <= 10.0 + 1e-4);
    }

    #[test]
    fn test_polyline_strip() {
        assert!(polyline_strip(&[Vec2::ZERO], 2.0, colors::WHITE).is_empty());
        let verts = polyline_strip(&[Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0)], 2.0, colors::WHITE);
        assert_eq!(verts.len(), 12);
        assert!(verts.iter().all(|v| v.position[1].abs() <= 1.0 + 1e-6));
    }

    #[test]
    fn test_backdrop_covers_viewport() {
        let verts = backdrop(800.0, 900.0);
        assert_eq!(verts.len(), 18);
        let max_y = verts.iter().map(|v| v.position[1]).fold(0.0, f32::max);
        assert!((max_y - 900.0).abs() < 1e-3);
    }
}
