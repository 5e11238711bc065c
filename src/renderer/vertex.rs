//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride of one vertex in an uploaded buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `position` (two f32)
    pub const POSITION_OFFSET: usize = 0;
    /// Byte offset of `color` (four f32)
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Reinterpret a vertex list as bytes for buffer upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Scale the alpha channel of a color
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

/// Linear blend between two colors
#[inline]
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Colors for scene elements
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    // Sunlit ice
    pub const SKY_50: [f32; 4] = rgb(0xf0, 0xf9, 0xff);
    pub const SKY_100: [f32; 4] = rgb(0xe0, 0xf2, 0xfe);
    pub const SKY_200: [f32; 4] = rgb(0xba, 0xe6, 0xfd);
    pub const SKY_300: [f32; 4] = rgb(0x7d, 0xd3, 0xfc);
    pub const SKY_400: [f32; 4] = rgb(0x38, 0xbd, 0xf8);
    pub const SKY_500: [f32; 4] = rgb(0x0e, 0xa5, 0xe9);
    pub const SKY_600: [f32; 4] = rgb(0x02, 0x84, 0xc7);
    pub const BLUE_100: [f32; 4] = rgb(0xdb, 0xea, 0xfe);
    pub const BLUE_300: [f32; 4] = rgb(0x93, 0xc5, 0xfd);
    pub const BLUE_400: [f32; 4] = rgb(0x60, 0xa5, 0xfa);
    pub const BLUE_500: [f32; 4] = rgb(0x3b, 0x82, 0xf6);

    // Submerged ice, darkest first
    pub const DEEP_0: [f32; 4] = rgb(0x00, 0x12, 0x16);
    pub const DEEP_1: [f32; 4] = rgb(0x00, 0x18, 0x24);
    pub const DEEP_2: [f32; 4] = rgb(0x00, 0x1f, 0x30);
    pub const DEEP_3: [f32; 4] = rgb(0x00, 0x21, 0x33);
    pub const DEEP_4: [f32; 4] = rgb(0x00, 0x29, 0x40);
    pub const DEEP_5: [f32; 4] = rgb(0x00, 0x2f, 0x45);
    pub const DEEP_6: [f32; 4] = rgb(0x00, 0x3d, 0x5c);

    // Water
    pub const WAVE_CREST: [f32; 4] = rgb(0x22, 0xd3, 0xee);
    pub const OCEAN_FLOOR: [f32; 4] = rgb(0x1e, 0x3a, 0x8a);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::POSITION_OFFSET, std::mem::offset_of!(Vertex, position));
        assert_eq!(Vertex::COLOR_OFFSET, std::mem::offset_of!(Vertex, color));
        // Color channels start right after the position in the uploaded bytes
        let v = [Vertex::new(1.0, 2.0, [0.25, 0.5, 0.75, 1.0])];
        let red = &as_bytes(&v)[Vertex::COLOR_OFFSET..Vertex::COLOR_OFFSET + 4];
        assert_eq!(red, &0.25f32.to_ne_bytes());
        let verts = [Vertex::new(1.0, 2.0, colors::WHITE); 3];
        assert_eq!(as_bytes(&verts).len(), 72);
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(with_alpha(colors::WHITE, 0.5)[3], 0.5);
        assert_eq!(with_alpha(colors::WHITE, 2.0)[3], 1.0);
        let mid = mix([0.0, 0.0, 0.0, 1.0], [1.0, 1.0, 1.0, 1.0], 0.5);
        assert!((mid[0] - 0.5).abs() < 1e-6);
        assert_eq!(mix([0.0, 0.0, 0.0, 1.0], colors::WHITE, 7.0), colors::WHITE);
    }

    #[test]
    fn test_palette_parsed() {
        assert!((colors::SKY_300[0] - 125.0 / 255.0).abs() < 1e-6);
        assert_eq!(colors::DEEP_0[0], 0.0);
    }
}
