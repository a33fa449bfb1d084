//! WebGPU rendering module
//!
//! Every frame the scene is rebuilt as a flat list of colored triangles in
//! play-field pixels, then mapped to clip space and drawn in one pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{Draw, build_scene};
pub use vertex::Vertex;
