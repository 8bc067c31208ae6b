//! CPU renderer for vertex-colored meshes: a programmable vertex/fragment
//! stage pair with fixed-function culling, near clipping, depth testing, and
//! perspective-correct interpolation in between.

pub mod clipping;
pub mod engine;
pub mod geometry;
pub mod rasterizer;
pub mod shader;
pub mod types;

pub use engine::{DrawCall, FrameParams, RenderWorker};
pub use shader::{fragment_stage, vertex_stage, DrawUniforms, ShadeMode};
pub use types::{Mesh, Varyings, Vertex};
