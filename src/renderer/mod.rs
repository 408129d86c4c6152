//! WebGPU rendering module
//!
//! Sprites from the simulation become flat-colored triangles in viewport
//! pixels; the pipeline maps them to NDC and draws them in one pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, viewport_to_ndc};
pub use scene::build_vertices;
pub use vertex::Vertex;
