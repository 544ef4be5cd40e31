//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and one Window per panel, and wires each to its
//! own GPU context.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
