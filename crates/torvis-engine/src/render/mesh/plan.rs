use crate::mesh::Color;

/// Where the color attribute of a draw comes from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ColorSource {
    /// Slot 1 of the vertex input, one color per vertex.
    PerVertex,
    /// Slot 1 is disabled; every vertex gets this color.
    Constant(Color),
}

/// Index list a draw consumes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Primitive {
    Triangles,
    Lines,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DrawOp {
    SetColor(ColorSource),
    Draw(Primitive),
}

/// Ordered draw sequence for one mesh instance.
///
/// Filled triangles with per-vertex color first, then the wireframe lines in
/// a single constant color. The sequence always ends with per-vertex color
/// restored, so nothing leaks into whatever is drawn next.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawPlan {
    ops: Vec<DrawOp>,
}

impl DrawPlan {
    pub fn new(line_color: Color) -> Self {
        Self {
            ops: vec![
                DrawOp::SetColor(ColorSource::PerVertex),
                DrawOp::Draw(Primitive::Triangles),
                DrawOp::SetColor(ColorSource::Constant(line_color)),
                DrawOp::Draw(Primitive::Lines),
                // Re-enables slot 1. wgpu pipelines carry no attribute state
                // across draws, so the renderer has nothing to undo here.
                DrawOp::SetColor(ColorSource::PerVertex),
            ],
        }
    }

    #[inline]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of draw calls issued by this plan.
    pub fn draw_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Draw(_)))
            .count()
    }

    /// Walks the plan, pairing every draw with the color source active at
    /// that point.
    pub fn draws(&self) -> impl Iterator<Item = (Primitive, ColorSource)> + '_ {
        let mut color = ColorSource::PerVertex;
        self.ops.iter().filter_map(move |op| match *op {
            DrawOp::SetColor(c) => {
                color = c;
                None
            }
            DrawOp::Draw(p) => Some((p, color)),
        })
    }

    /// Color source in effect once the plan has run.
    pub fn final_color(&self) -> ColorSource {
        self.ops
            .iter()
            .rev()
            .find_map(|op| match *op {
                DrawOp::SetColor(c) => Some(c),
                DrawOp::Draw(_) => None,
            })
            .unwrap_or(ColorSource::PerVertex)
    }
}
