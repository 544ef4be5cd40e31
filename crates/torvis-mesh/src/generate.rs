use std::f64::consts::TAU;

use crate::color::Color;
use crate::grid::{GridConfig, GridDims, GridIndex};

/// One grid point as seen by consumers of a [`Mesh`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: Color,
}

/// Generated torus geometry.
///
/// Positions and colors are stored as separate arrays (one GPU buffer each).
/// `line_indices` and `triangle_indices` both address the same vertices; every
/// interior quad appears once in each list, as two diagonals and as two
/// triangles respectively.
///
/// Invariants:
/// - `positions.len() == colors.len() == dims.vertex_count()`
/// - every index is `< vertex_count()`
/// - the grid is not wrapped: ring `n` never connects to ring `0`, and tube
///   step `m` never connects to step `0`
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    dims: GridDims,
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    line_indices: Vec<u32>,
    triangle_indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    #[inline]
    pub fn line_indices(&self) -> &[u32] {
        &self.line_indices
    }

    #[inline]
    pub fn triangle_indices(&self) -> &[u32] {
        &self.triangle_indices
    }

    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        let position = *self.positions.get(index)?;
        let color = Color::from(*self.colors.get(index)?);
        Some(Vertex { position, color })
    }

    /// Vertex at a grid coordinate.
    pub fn vertex_at(&self, idx: GridIndex) -> Option<Vertex> {
        self.vertex(self.dims.flatten(idx)? as usize)
    }

    /// Largest absolute coordinate over all positions.
    ///
    /// Positions are consumed as clip-space coordinates, so anything above
    /// `1.0` is partially clipped away.
    pub fn extent(&self) -> f32 {
        self.positions
            .iter()
            .flat_map(|p| p.iter())
            .fold(0.0f32, |acc, c| acc.max(c.abs()))
    }
}

/// Builds the mesh described by `config`.
///
/// For grid point `(k, i, j)` with `t = i·2π/n` and `p = j·2π/m`:
///
/// ```text
/// x = (R + r·cos p)·cos t · (k·s)   // lofted only; 2D leaves x unscaled
/// y = (R + r·cos p)·sin t
/// z = r·sin p
/// ```
///
/// Colors come from the config ramp at `progress = i/n`. Every point with
/// `i > 0` and `j > 0` closes the quad to its lower neighbours and emits two
/// diagonals `(v−1, v)`, `(v−(m+1), v)` and two counter-clockwise triangles
/// `(v, v−1, v−(m+1))`, `(v−1, v−(m+1)−1, v−(m+1))`.
pub fn generate(config: &GridConfig) -> Mesh {
    let dims = config.dims();
    let n = config.ring_segments();
    let m = config.tube_segments();
    let big_r = config.major_radius() as f64;
    let small_r = config.minor_radius() as f64;
    let loft = config.loft();
    let ramp = config.ramp();

    let dt = TAU / n as f64;
    let dp = TAU / m as f64;
    let row = m + 1;

    let mut positions = Vec::with_capacity(dims.vertex_count());
    let mut colors = Vec::with_capacity(dims.vertex_count());
    let mut line_indices = Vec::with_capacity(dims.line_index_count());
    let mut triangle_indices = Vec::with_capacity(dims.triangle_index_count());

    // Ring colors do not depend on j or k.
    let ring_colors: Vec<[f32; 4]> = (0..=n)
        .map(|i| ramp.eval(i as f32 / n as f32).to_array())
        .collect();

    for k in 0..dims.slices {
        let x_scale = loft.map_or(1.0, |l| l.x_scale(k));

        for i in 0..=n {
            let t = i as f64 * dt;
            let (sin_t, cos_t) = t.sin_cos();

            for j in 0..=m {
                let p = j as f64 * dp;
                let (sin_p, cos_p) = p.sin_cos();

                let ring = big_r + small_r * cos_p;
                positions.push([
                    (ring * cos_t * x_scale) as f32,
                    (ring * sin_t) as f32,
                    (small_r * sin_p) as f32,
                ]);
                colors.push(ring_colors[i as usize]);

                if i > 0 && j > 0 {
                    // Vertex count fits u32 (checked by GridConfig), so this does too.
                    let v = positions.len() as u32 - 1;
                    let left = v - 1;
                    let below = v - row;
                    let diag = below - 1;

                    line_indices.extend_from_slice(&[left, v, below, v]);
                    triangle_indices.extend_from_slice(&[v, left, below, left, diag, below]);
                }
            }
        }
    }

    debug_assert_eq!(positions.len(), dims.vertex_count());
    debug_assert_eq!(line_indices.len(), dims.line_index_count());
    debug_assert_eq!(triangle_indices.len(), dims.triangle_index_count());

    log::debug!(
        "generated torus grid {}x{}x{}: {} vertices, {} line indices, {} triangle indices",
        n,
        m,
        dims.slices,
        positions.len(),
        line_indices.len(),
        triangle_indices.len()
    );

    Mesh {
        dims,
        positions,
        colors,
        line_indices,
        triangle_indices,
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::grid::GridParams;
    use crate::ramp::ColorRamp;

    const EPS: f32 = 1e-6;

    fn config(n: i64, m: i64, loft_count: Option<i64>) -> GridConfig {
        GridConfig::new(GridParams {
            ring_segments: n,
            tube_segments: m,
            major_radius: 0.6,
            minor_radius: 0.2,
            loft_count,
            loft_step: None,
            ramp: ColorRamp::CORAL,
        })
        .unwrap()
    }

    fn close(a: f32, b: f64) -> bool {
        (a as f64 - b).abs() < EPS as f64
    }

    // ── sizes ─────────────────────────────────────────────────────────────

    #[test]
    fn reference_example_sizes() {
        let mesh = generate(&config(4, 2, None));
        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh.colors().len(), 15);
        assert_eq!(mesh.line_indices().len(), 32);
        assert_eq!(mesh.triangle_indices().len(), 48);
    }

    #[test]
    fn sizes_follow_closed_form() {
        for (n, m, k) in [(1, 1, None), (3, 5, None), (64, 32, None), (24, 3, Some(10)), (2, 7, Some(0))] {
            let mesh = generate(&config(n, m, k));
            let slices = k.map_or(1, |k| k as usize + 1);
            let (n, m) = (n as usize, m as usize);
            assert_eq!(mesh.vertex_count(), (n + 1) * (m + 1) * slices);
            assert_eq!(mesh.line_indices().len(), 2 * 2 * n * m * slices);
            assert_eq!(mesh.triangle_indices().len(), 3 * 2 * n * m * slices);
        }
    }

    #[test]
    fn indices_are_in_bounds() {
        for (n, m, k) in [(1, 1, None), (4, 2, None), (24, 3, Some(10))] {
            let mesh = generate(&config(n, m, k));
            let count = mesh.vertex_count() as u32;
            assert!(mesh.line_indices().iter().all(|&i| i < count));
            assert!(mesh.triangle_indices().iter().all(|&i| i < count));
        }
    }

    // ── positions ─────────────────────────────────────────────────────────

    #[test]
    fn reference_example_vertex() {
        let mesh = generate(&config(4, 2, None));
        let v = mesh.vertex(7).unwrap();

        let t = 2.0 * (2.0 * PI / 4.0);
        let p = 1.0 * (2.0 * PI / 2.0);
        let ring = 0.6 + 0.2 * p.cos();
        assert!(close(v.position[0], ring * t.cos()), "{:?}", v.position);
        assert!(close(v.position[1], ring * t.sin()), "{:?}", v.position);
        assert!(close(v.position[2], 0.2 * p.sin()), "{:?}", v.position);

        assert_eq!(mesh.vertex_at(GridIndex::new(2, 1)), Some(v));
    }

    #[test]
    fn zero_loft_count_keeps_x_unscaled() {
        let mesh = generate(&config(4, 2, Some(0)));
        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh, generate(&config(4, 2, None)));

        // (0.6 + 0.2·cos π)·cos π
        let v = mesh.vertex(7).unwrap();
        assert!(close(v.position[0], -0.4), "{:?}", v.position);
    }

    #[test]
    fn grid_addressing_round_trips() {
        let cfg = config(6, 4, None);
        let mesh = generate(&cfg);
        let dims = mesh.dims();
        for flat in 0..mesh.vertex_count() {
            let idx = dims.unflatten(flat as u32).unwrap();
            assert_eq!(flat, idx.i as usize * (4 + 1) + idx.j as usize);

            let t = idx.i as f64 * (2.0 * PI / 6.0);
            let p = idx.j as f64 * (2.0 * PI / 4.0);
            let ring = 0.6 + 0.2 * p.cos();
            let pos = mesh.positions()[flat];
            assert!(close(pos[0], ring * t.cos()));
            assert!(close(pos[1], ring * t.sin()));
            assert!(close(pos[2], 0.2 * p.sin()));
        }
    }

    #[test]
    fn extent_within_clip_space() {
        let mesh = generate(&config(64, 32, None));
        assert!(mesh.extent() <= 0.8 + EPS);
        assert!(mesh.extent() > 0.79);
    }

    #[test]
    fn lofted_slices_scale_x_only() {
        let mesh = generate(&config(2, 1, Some(1)));
        assert_eq!(mesh.vertex_count(), 12);

        let flat = generate(&config(2, 1, None));
        for s in 0..6 {
            let base = flat.positions()[s];
            let k0 = mesh.positions()[s];
            let k1 = mesh.positions()[6 + s];

            assert!(k0[0].abs() < EPS, "k=0 slice must collapse to the y-z plane");
            assert!((k1[0] - base[0] * 0.1).abs() < EPS);

            for axis in 1..3 {
                assert!((k0[axis] - base[axis]).abs() < EPS);
                assert!((k1[axis] - base[axis]).abs() < EPS);
            }
        }
    }

    #[test]
    fn lofted_with_custom_step() {
        let cfg = GridConfig::new(GridParams {
            ring_segments: 4,
            tube_segments: 2,
            major_radius: 0.5,
            minor_radius: 0.1,
            loft_count: Some(3),
            loft_step: Some(0.25),
            ramp: ColorRamp::AMBER,
        })
        .unwrap();
        let mesh = generate(&cfg);
        // (k=3, i=0, j=0): x = (R + r)·1·(3·0.25)
        let v = mesh.vertex_at(GridIndex::lofted(3, 0, 0)).unwrap();
        assert!((v.position[0] - 0.6 * 0.75).abs() < EPS);
    }

    // ── colors ────────────────────────────────────────────────────────────

    #[test]
    fn color_depends_on_ring_only() {
        let mesh = generate(&config(8, 3, Some(2)));
        let dims = mesh.dims();
        for flat in 0..mesh.vertex_count() {
            let idx = dims.unflatten(flat as u32).unwrap();
            let expected = ColorRamp::CORAL.eval(idx.i as f32 / 8.0).to_array();
            assert_eq!(mesh.colors()[flat], expected);
            assert_eq!(mesh.colors()[flat][3], 1.0);
        }
    }

    #[test]
    fn first_and_last_ring_use_ramp_endpoints() {
        let mesh = generate(&config(4, 2, None));
        assert_eq!(mesh.vertex_at(GridIndex::new(0, 0)).unwrap().color, ColorRamp::CORAL.start);
        assert_eq!(mesh.vertex_at(GridIndex::new(2, 0)).unwrap().color, ColorRamp::CORAL.mid);
        assert_eq!(mesh.vertex_at(GridIndex::new(4, 2)).unwrap().color, ColorRamp::CORAL.end);
    }

    // ── topology ──────────────────────────────────────────────────────────

    #[test]
    fn first_quad_layout() {
        // n=4, m=2: the first emitting point is (1, 1) → v = 4.
        let mesh = generate(&config(4, 2, None));
        assert_eq!(&mesh.line_indices()[..4], &[3, 4, 1, 4]);
        assert_eq!(&mesh.triangle_indices()[..6], &[4, 3, 1, 3, 0, 1]);
    }

    #[test]
    fn lines_and_triangles_describe_same_quads() {
        let mesh = generate(&config(5, 4, Some(1)));
        let lines = mesh.line_indices().chunks(4);
        let tris = mesh.triangle_indices().chunks(6);
        for (l, t) in lines.zip(tris) {
            // Both lists share the quad's anchor vertex and its two neighbours.
            let v = l[1];
            assert_eq!(l[3], v);
            assert_eq!(t[0], v);
            assert_eq!(t[1], l[0]);
            assert_eq!(t[2], l[2]);
            assert_eq!(t[3], l[0]);
            assert_eq!(t[5], l[2]);
            assert_eq!(t[4], l[2] - 1);
        }
    }

    #[test]
    fn triangles_share_one_winding() {
        let mesh = generate(&config(6, 4, None));
        let dims = mesh.dims();
        for tri in mesh.triangle_indices().chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|v| {
                let g = dims.unflatten(v).unwrap();
                (g.i as i64, g.j as i64)
            });
            let cross = (b.0 - a.0) * (c.1 - a.1) - (b.1 - a.1) * (c.0 - a.0);
            // Both triangles of every quad turn the same way in (i, j) space.
            assert_eq!(cross, -1, "inconsistent winding {tri:?}");
        }
    }

    #[test]
    fn seams_stay_open() {
        for (n, m, k) in [(4, 2, None), (6, 3, Some(2))] {
            let mesh = generate(&config(n, m, k));
            let dims = mesh.dims();
            let (n, m) = (n as u32, m as u32);

            let connected = |a: u32, b: u32| {
                let ga = dims.unflatten(a).unwrap();
                let gb = dims.unflatten(b).unwrap();
                let ring_seam = (ga.i == n && gb.i == 0) || (ga.i == 0 && gb.i == n);
                let tube_seam = (ga.j == m && gb.j == 0) || (ga.j == 0 && gb.j == m);
                ring_seam || tube_seam || ga.k != gb.k
            };

            for pair in mesh.line_indices().chunks(2) {
                assert!(!connected(pair[0], pair[1]), "line crosses seam: {pair:?}");
            }
            for tri in mesh.triangle_indices().chunks(3) {
                for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                    assert!(!connected(a, b), "triangle crosses seam: {tri:?}");
                }
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let cfg = config(12, 6, Some(3));
        assert_eq!(generate(&cfg), generate(&cfg));
    }
}
