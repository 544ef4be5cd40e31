use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::mesh::Color;
use crate::render::{RenderCtx, RenderError};

use super::plan::{ColorSource, DrawPlan, Primitive};
use super::scope::ErrorCapture;
use super::shaders::{CompiledShaders, FRAGMENT_ENTRY, ShaderLibrary, VertexTransform};

/// Uniform backing the constant line color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct LineColorUniform {
    pub color: [f32; 4],
}

impl LineColorUniform {
    fn min_binding_size() -> Option<std::num::NonZeroU64> {
        std::num::NonZeroU64::new(std::mem::size_of::<Self>() as u64)
    }
}

const POSITION_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];

fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &POSITION_ATTRS,
    }
}

fn color_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 4]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &COLOR_ATTRS,
    }
}

pub(super) fn primitive_state(topology: wgpu::PrimitiveTopology) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: Some(wgpu::Face::Back),
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Which render pipeline a draw needs.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(super) struct PipelineKey {
    pub primitive: Primitive,
    /// Reads color from slot 1; otherwise from the uniform.
    pub per_vertex: bool,
}

impl PipelineKey {
    pub(super) fn of(primitive: Primitive, color: ColorSource) -> Self {
        Self {
            primitive,
            per_vertex: color == ColorSource::PerVertex,
        }
    }

    fn topology(self) -> wgpu::PrimitiveTopology {
        match self.primitive {
            Primitive::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Primitive::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }

    fn label(self) -> &'static str {
        match (self.primitive, self.per_vertex) {
            (Primitive::Triangles, true) => "torvis mesh triangles/per-vertex",
            (Primitive::Triangles, false) => "torvis mesh triangles/constant",
            (Primitive::Lines, true) => "torvis mesh lines/per-vertex",
            (Primitive::Lines, false) => "torvis mesh lines/constant",
        }
    }
}

/// Distinct pipeline keys `plan` draws with, in first-use order.
pub(super) fn required_keys(plan: &DrawPlan) -> Vec<PipelineKey> {
    let mut keys = Vec::new();
    for (primitive, color) in plan.draws() {
        let key = PipelineKey::of(primitive, color);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

/// Color the uniform carries: the plan's constant color, if it has one.
fn uniform_color(plan: &DrawPlan) -> Color {
    plan.draws()
        .find_map(|(_, color)| match color {
            ColorSource::Constant(c) => Some(c),
            ColorSource::PerVertex => None,
        })
        .unwrap_or_default()
}

/// Pipeline state for one mesh instance.
///
/// wgpu has no notion of a disabled vertex attribute with a current value, so
/// every pipeline key the plan uses gets its own pipeline: per-vertex variants
/// read slots 0 and 1, constant variants read slot 0 only and take their color
/// from the uniform at `@group(0) @binding(0)`.
pub(super) struct MeshPipeline {
    variants: Vec<(PipelineKey, wgpu::RenderPipeline)>,
    _line_color_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl MeshPipeline {
    pub(super) fn new(
        ctx: &RenderCtx<'_>,
        library: &ShaderLibrary,
        transform: VertexTransform,
        plan: &DrawPlan,
    ) -> Result<Self, RenderError> {
        let shaders = library.compile(ctx)?;

        let capture = ErrorCapture::begin(ctx.device);
        let built = Self::build(ctx, &shaders, transform, plan);

        capture.into_result(built, |message| RenderError::ShaderLink { message })
    }

    fn build(
        ctx: &RenderCtx<'_>,
        shaders: &CompiledShaders,
        transform: VertexTransform,
        plan: &DrawPlan,
    ) -> Self {
        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("torvis mesh bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: LineColorUniform::min_binding_size(),
                        },
                        count: None,
                    }],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("torvis mesh pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let line_color_ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("torvis mesh line color ubo"),
            contents: bytemuck::bytes_of(&LineColorUniform {
                color: uniform_color(plan).to_array(),
            }),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("torvis mesh bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: line_color_ubo.as_entire_binding(),
            }],
        });

        let make = |key: PipelineKey| {
            let with_color = [position_layout(), color_layout()];
            let buffers: &[wgpu::VertexBufferLayout<'_>] = if key.per_vertex {
                &with_color
            } else {
                &with_color[..1]
            };

            ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(key.label()),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shaders.vertex,
                    entry_point: Some(transform.entry_point(key.per_vertex)),
                    compilation_options: Default::default(),
                    buffers,
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shaders.fragment,
                    entry_point: Some(FRAGMENT_ENTRY),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: primitive_state(key.topology()),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let variants = required_keys(plan)
            .into_iter()
            .map(|key| (key, make(key)))
            .collect();

        Self {
            variants,
            _line_color_ubo: line_color_ubo,
            bind_group,
        }
    }

    /// Pipeline for `primitive` drawn with `color`, if the plan used it.
    pub(super) fn select(
        &self,
        primitive: Primitive,
        color: ColorSource,
    ) -> Option<&wgpu::RenderPipeline> {
        let key = PipelineKey::of(primitive, color);
        self.variants
            .iter()
            .find_map(|(k, pipeline)| (*k == key).then_some(pipeline))
    }

    #[inline]
    pub(super) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
