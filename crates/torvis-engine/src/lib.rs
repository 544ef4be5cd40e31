//! Torvis engine crate.
//!
//! This crate owns the platform + GPU runtime pieces and the mesh renderer.
//! Geometry itself comes from `torvis-mesh`; nothing here generates vertices.

pub mod device;
pub mod window;
pub mod core;

pub mod logging;
pub mod render;

pub use torvis_mesh as mesh;
