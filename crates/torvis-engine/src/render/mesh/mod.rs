//! Mesh renderer: filled triangles with per-vertex color, then the wireframe
//! in one constant color.
//!
//! - [`ShaderLibrary`]: the two shader stages, embedded and shared
//! - [`MeshBuffers`]: vertex and index upload
//! - [`DrawPlan`]: the ordered draw/color-source sequence
//! - [`MeshRenderer`]: ties them together for one mesh instance

mod buffers;
mod pipeline;
mod plan;
mod renderer;
mod scope;
mod shaders;

pub use buffers::MeshBuffers;
pub use plan::{ColorSource, DrawOp, DrawPlan, Primitive};
pub use renderer::MeshRenderer;
pub use shaders::{ShaderLibrary, VertexTransform};
