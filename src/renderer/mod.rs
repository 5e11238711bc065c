//! Vertex generation for the host renderer
//!
//! Turns a laid-out [`crate::iceberg::Scene`] into triangle lists of
//! `Pod` vertices ready for buffer upload. No GPU state lives here.

pub mod shapes;
pub mod vertex;

pub use shapes::SceneVertices;
pub use vertex::{Vertex, colors};
