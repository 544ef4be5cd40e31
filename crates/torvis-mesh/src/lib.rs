//! Procedural torus grids for the **torvis** viewer.
//!
//! A [`GridConfig`] describes a regular `(n+1) × (m+1)` parametric grid wrapped
//! onto a torus (optionally lofted into `K+1` x-stretched slices). [`generate`]
//! turns it into a [`Mesh`]: positions, ramp colors, and two index lists over
//! the same vertices: one for a line list, one for a triangle list.
//!
//! This crate is intentionally free of GPU code; the engine consumes a finished
//! `Mesh` and only uploads it.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`color`] | `Color` |
//! | [`ramp`] | `ColorRamp` |
//! | [`grid`] | `GridParams`, `GridConfig`, `Loft`, `GridDims`, `GridIndex` |
//! | [`generate`] | `Mesh`, `Vertex`, `generate` entry point |
//! | [`error`] | `ConfigError` |
//!
//! # Quick start
//!
//! ```rust
//! use torvis_mesh::{generate, ColorRamp, GridConfig, GridParams};
//!
//! let config = GridConfig::new(GridParams {
//!     ring_segments: 4,
//!     tube_segments: 2,
//!     major_radius: 0.6,
//!     minor_radius: 0.2,
//!     loft_count: None,
//!     loft_step: None,
//!     ramp: ColorRamp::CORAL,
//! })
//! .unwrap();
//!
//! let mesh = generate(&config);
//! assert_eq!(mesh.vertex_count(), 15);
//! assert_eq!(mesh.line_indices().len(), 32);
//! assert_eq!(mesh.triangle_indices().len(), 48);
//! ```

pub mod color;
pub mod error;
pub mod generate;
pub mod grid;
pub mod ramp;

pub use color::Color;
pub use error::ConfigError;
pub use generate::{generate, Mesh, Vertex};
pub use grid::{GridConfig, GridDims, GridIndex, GridParams, Loft, DEFAULT_LOFT_STEP};
pub use ramp::ColorRamp;
