use crate::mesh::{Color, Mesh};
use crate::render::{RenderCtx, RenderError, RenderTarget};

use super::buffers::MeshBuffers;
use super::pipeline::MeshPipeline;
use super::plan::{ColorSource, DrawPlan, Primitive};
use super::shaders::{ShaderLibrary, VertexTransform};

/// One mesh instance bound to one device.
///
/// Owns the mesh and every GPU resource drawn from it; nothing is shared with
/// other instances except the read-only [`ShaderLibrary`].
pub struct MeshRenderer {
    mesh: Mesh,
    buffers: MeshBuffers,
    pipeline: MeshPipeline,
    plan: DrawPlan,
}

impl MeshRenderer {
    /// Compiles the shaders, builds the pipelines and uploads `mesh`.
    pub fn new(ctx: &RenderCtx<'_>, mesh: Mesh, line_color: Color) -> Result<Self, RenderError> {
        let transform = VertexTransform::Passthrough;

        let extent = mesh.extent();
        if extent > 1.0 {
            log::warn!(
                "mesh extent {extent:.3} exceeds clip space; {:?} transform will clip it",
                transform
            );
        }

        let plan = DrawPlan::new(line_color);
        let pipeline = MeshPipeline::new(ctx, ShaderLibrary::shared(), transform, &plan)?;
        let buffers = MeshBuffers::upload(ctx.device, &mesh)?;

        log::debug!(
            "mesh renderer ready: {} vertices, {} line / {} triangle indices",
            mesh.vertex_count(),
            buffers.line_index_count(),
            buffers.triangle_index_count()
        );

        Ok(Self {
            mesh,
            buffers,
            pipeline,
            plan,
        })
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[inline]
    pub fn plan(&self) -> &DrawPlan {
        &self.plan
    }

    /// Records the draw plan into `target` on top of its current contents.
    pub fn render(&self, target: &mut RenderTarget<'_>) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("torvis mesh pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_bind_group(0, self.pipeline.bind_group(), &[]);
        rpass.set_vertex_buffer(0, self.buffers.positions.slice(..));

        for (primitive, color) in self.plan.draws() {
            let Some(pipeline) = self.pipeline.select(primitive, color) else {
                continue;
            };
            rpass.set_pipeline(pipeline);

            if color == ColorSource::PerVertex {
                rpass.set_vertex_buffer(1, self.buffers.colors.slice(..));
            }

            let (indices, count) = match primitive {
                Primitive::Triangles => (
                    &self.buffers.triangle_indices,
                    self.buffers.triangle_index_count(),
                ),
                Primitive::Lines => (&self.buffers.line_indices, self.buffers.line_index_count()),
            };
            rpass.set_index_buffer(indices.slice(..), MeshBuffers::INDEX_FORMAT);
            rpass.draw_indexed(0..count, 0, 0..1);
        }
    }
}
