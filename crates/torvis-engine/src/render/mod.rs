//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record commands
//! into a [`RenderTarget`] handed out by `core::FrameCtx::render`.
//!
//! Convention:
//! - positions arrive as clip-space coordinates; there is no camera
//! - colors are straight linear RGBA written without blending

mod ctx;
mod error;
pub mod mesh;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::{RenderError, ShaderStage};
