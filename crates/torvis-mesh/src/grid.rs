use serde::Deserialize;

use crate::error::ConfigError;
use crate::ramp::ColorRamp;

/// Loft step used when a config asks for a loft without naming one.
pub const DEFAULT_LOFT_STEP: f32 = 0.1;

/// Raw grid parameters, as written by a user or a config file.
///
/// Counts are signed on purpose: a negative count is a configuration mistake
/// that should be reported by [`GridConfig::new`] with the field name, not
/// swallowed as a parse failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridParams {
    /// `n`: subdivisions around the major circle.
    pub ring_segments: i64,
    /// `m`: subdivisions around the tube cross-section.
    pub tube_segments: i64,
    /// `R`
    pub major_radius: f32,
    /// `r`
    pub minor_radius: f32,
    /// `K`: when present and non-zero, the grid is lofted into `K+1` slices.
    /// `0` is the flat 2D grid, same as omitting it.
    #[serde(default)]
    pub loft_count: Option<i64>,
    /// `s`: per-slice x scale step. Only meaningful with `loft_count`.
    #[serde(default)]
    pub loft_step: Option<f32>,
    #[serde(default)]
    pub ramp: ColorRamp,
}

/// Loft along the synthetic third axis.
///
/// Slice `k ∈ [0, count]` scales only the x-coordinate by `k · step`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Loft {
    pub count: u32,
    pub step: f32,
}

impl Loft {
    #[inline]
    pub fn slices(&self) -> u32 {
        self.count + 1
    }

    #[inline]
    pub fn x_scale(&self, k: u32) -> f64 {
        k as f64 * self.step as f64
    }
}

/// Validated, immutable grid configuration.
///
/// The only way to obtain one is [`GridConfig::new`] (or its `TryFrom` /
/// serde equivalents), so every `GridConfig` in circulation describes a mesh
/// that can be generated without further checks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "GridParams")]
pub struct GridConfig {
    ring_segments: u32,
    tube_segments: u32,
    major_radius: f32,
    minor_radius: f32,
    loft: Option<Loft>,
    ramp: ColorRamp,
}

impl GridConfig {
    pub fn new(params: GridParams) -> Result<Self, ConfigError> {
        let GridParams {
            ring_segments,
            tube_segments,
            major_radius,
            minor_radius,
            loft_count,
            loft_step,
            ramp,
        } = params;

        let ring_segments = count_at_least("ring_segments", ring_segments, 1)?;
        let tube_segments = count_at_least("tube_segments", tube_segments, 1)?;
        let major_radius = positive("major_radius", major_radius)?;
        let minor_radius = positive("minor_radius", minor_radius)?;

        let step = match loft_step {
            Some(s) if !s.is_finite() => {
                return Err(ConfigError::NotFinite { field: "loft_step", value: s });
            }
            Some(s) => s,
            None => DEFAULT_LOFT_STEP,
        };

        let loft = match loft_count {
            Some(k) => match count_at_least("loft_count", k, 0)? {
                0 => None,
                count => Some(Loft { count, step }),
            },
            None => {
                if loft_step.is_some() {
                    log::debug!("loft_step given without loft_count; ignored");
                }
                None
            }
        };

        if !ramp.is_finite() {
            return Err(ConfigError::InvalidColor { field: "ramp" });
        }

        let slices = loft.map_or(1, |l| l.count as u128 + 1);
        let vertices = (ring_segments as u128 + 1) * (tube_segments as u128 + 1) * slices;
        if vertices > u32::MAX as u128 {
            return Err(ConfigError::TooManyVertices { vertices });
        }

        Ok(Self {
            ring_segments,
            tube_segments,
            major_radius,
            minor_radius,
            loft,
            ramp,
        })
    }

    #[inline]
    pub fn ring_segments(&self) -> u32 {
        self.ring_segments
    }

    #[inline]
    pub fn tube_segments(&self) -> u32 {
        self.tube_segments
    }

    #[inline]
    pub fn major_radius(&self) -> f32 {
        self.major_radius
    }

    #[inline]
    pub fn minor_radius(&self) -> f32 {
        self.minor_radius
    }

    #[inline]
    pub fn loft(&self) -> Option<Loft> {
        self.loft
    }

    #[inline]
    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn dims(&self) -> GridDims {
        GridDims {
            ring_segments: self.ring_segments,
            tube_segments: self.tube_segments,
            slices: self.loft.map_or(1, |l| l.slices()),
        }
    }
}

impl TryFrom<GridParams> for GridConfig {
    type Error = ConfigError;

    fn try_from(params: GridParams) -> Result<Self, Self::Error> {
        GridConfig::new(params)
    }
}

fn count_at_least(field: &'static str, value: i64, min: i64) -> Result<u32, ConfigError> {
    if value < min {
        return Err(ConfigError::CountTooSmall { field, min, value });
    }
    // Anything past u32 is caught by the vertex-count check with a better message.
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Position of a grid point: slice `k`, ring step `i`, tube step `j`.
///
/// The 2D variant always has `k = 0`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct GridIndex {
    pub k: u32,
    pub i: u32,
    pub j: u32,
}

impl GridIndex {
    #[inline]
    pub const fn new(i: u32, j: u32) -> Self {
        Self { k: 0, i, j }
    }

    #[inline]
    pub const fn lofted(k: u32, i: u32, j: u32) -> Self {
        Self { k, i, j }
    }
}

/// Grid extents and the closed-form sizes derived from them.
///
/// Layout is slice-major, then ring-major: `k·(n+1)·(m+1) + i·(m+1) + j`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridDims {
    /// `n`
    pub ring_segments: u32,
    /// `m`
    pub tube_segments: u32,
    /// `K+1`, or `1` for the 2D variant.
    pub slices: u32,
}

impl GridDims {
    /// Points per ring, `m+1`.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.tube_segments as usize + 1
    }

    /// Points per slice, `(n+1)·(m+1)`.
    #[inline]
    pub fn slice_len(&self) -> usize {
        (self.ring_segments as usize + 1) * self.row_len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.slice_len() * self.slices as usize
    }

    /// Quads that receive indices: every point with `i > 0` and `j > 0`.
    #[inline]
    pub fn quad_count(&self) -> usize {
        self.ring_segments as usize * self.tube_segments as usize * self.slices as usize
    }

    /// Two diagonals of two indices per quad.
    #[inline]
    pub fn line_index_count(&self) -> usize {
        self.quad_count() * 2 * 2
    }

    /// Two triangles of three indices per quad.
    #[inline]
    pub fn triangle_index_count(&self) -> usize {
        self.quad_count() * 3 * 2
    }

    #[inline]
    pub fn contains(&self, idx: GridIndex) -> bool {
        idx.k < self.slices && idx.i <= self.ring_segments && idx.j <= self.tube_segments
    }

    /// Flattened vertex index, or `None` when `idx` lies outside the grid.
    pub fn flatten(&self, idx: GridIndex) -> Option<u32> {
        if !self.contains(idx) {
            return None;
        }
        let flat = idx.k as usize * self.slice_len() + idx.i as usize * self.row_len() + idx.j as usize;
        u32::try_from(flat).ok()
    }

    /// Inverse of [`flatten`](Self::flatten).
    pub fn unflatten(&self, flat: u32) -> Option<GridIndex> {
        let flat = flat as usize;
        if flat >= self.vertex_count() {
            return None;
        }
        let k = flat / self.slice_len();
        let rem = flat % self.slice_len();
        Some(GridIndex {
            k: k as u32,
            i: (rem / self.row_len()) as u32,
            j: (rem % self.row_len()) as u32,
        })
    }
}
