//! Iceberg layout engine
//!
//! Pure functions of `(total, time)`:
//! - `layout`: points → percentage → visible fraction → peak anchor
//! - `oscillation`: time → bob, sway, light shift, wave phase
//! - `mesh`: anchor-relative triangle tables and their placement
//! - `water`: wave strokes and waterline shimmer
//! - `scene`: clip rects, label, and the per-frame scene
//! - `engine`: validated config + ladder behind one entry point

pub mod engine;
pub mod layout;
pub mod mesh;
pub mod oscillation;
pub mod scene;
pub mod water;

pub use engine::{IcebergEngine, IcebergStats};
pub use layout::{VisualState, visible_fraction, visible_percentage, waterline_offset};
pub use mesh::{Facet, Fill, GradientDirection, MESH_HEIGHT, PlacedEllipse, PlacedFacet, Region};
pub use oscillation::{OscillationVector, oscillate};
pub use scene::{ClipBounds, ClipRect, PercentLabel, Scene};
pub use water::WavePath;
