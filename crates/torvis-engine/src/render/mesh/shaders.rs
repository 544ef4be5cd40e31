use crate::render::{RenderCtx, RenderError, ShaderStage};

use super::scope::ErrorCapture;

/// How vertex positions become clip-space positions.
///
/// Only [`VertexTransform::Passthrough`] exists: the mesh is drawn without a
/// camera, so generated coordinates must already lie in `[-1, 1]`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum VertexTransform {
    #[default]
    Passthrough,
}

impl VertexTransform {
    /// Vertex entry point implementing this transform for the given color source.
    pub(super) fn entry_point(self, per_vertex_color: bool) -> &'static str {
        match (self, per_vertex_color) {
            (VertexTransform::Passthrough, true) => "vs_per_vertex",
            (VertexTransform::Passthrough, false) => "vs_constant",
        }
    }
}

/// The mesh shader sources, embedded once and shared by every renderer.
#[derive(Debug)]
pub struct ShaderLibrary {
    pub version: &'static str,
    pub vertex: &'static str,
    pub fragment: &'static str,
}

static LIBRARY: ShaderLibrary = ShaderLibrary {
    version: "mesh/1",
    vertex: include_str!("shaders/mesh.vert.wgsl"),
    fragment: include_str!("shaders/mesh.frag.wgsl"),
};

pub(super) const FRAGMENT_ENTRY: &str = "fs_main";

impl ShaderLibrary {
    #[inline]
    pub fn shared() -> &'static ShaderLibrary {
        &LIBRARY
    }

    /// Compiles both stages on `ctx.device`.
    pub(super) fn compile(&self, ctx: &RenderCtx<'_>) -> Result<CompiledShaders, RenderError> {
        let vertex = compile_stage(ctx, ShaderStage::Vertex, self.vertex)?;
        let fragment = compile_stage(ctx, ShaderStage::Fragment, self.fragment)?;
        log::debug!("compiled shader library {}", self.version);
        Ok(CompiledShaders { vertex, fragment })
    }
}

pub(super) struct CompiledShaders {
    pub vertex: wgpu::ShaderModule,
    pub fragment: wgpu::ShaderModule,
}

fn compile_stage(
    ctx: &RenderCtx<'_>,
    stage: ShaderStage,
    source: &'static str,
) -> Result<wgpu::ShaderModule, RenderError> {
    let label = match stage {
        ShaderStage::Vertex => "torvis mesh.vert",
        ShaderStage::Fragment => "torvis mesh.frag",
    };

    let capture = ErrorCapture::begin(ctx.device);
    let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    capture.into_result(module, |message| RenderError::ShaderCompile { stage, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_declare_every_entry_point() {
        let lib = ShaderLibrary::shared();
        for per_vertex in [true, false] {
            let entry = VertexTransform::Passthrough.entry_point(per_vertex);
            assert!(lib.vertex.contains(&format!("fn {entry}(")), "{entry}");
        }
        assert!(lib.fragment.contains(&format!("fn {FRAGMENT_ENTRY}(")));
    }

    #[test]
    fn vertex_inputs_use_fixed_slots() {
        let src = ShaderLibrary::shared().vertex;
        assert!(src.contains("@location(0) position: vec3<f32>"));
        assert!(src.contains("@location(1) color: vec4<f32>"));
        assert!(src.contains("@group(0) @binding(0)"));
    }

    #[test]
    fn invalid_source_is_reported_as_shader_compile() {
        let Some((device, queue)) = super::super::scope::test_device() else {
            return;
        };
        let ctx = RenderCtx::new(&device, &queue, wgpu::TextureFormat::Rgba8Unorm);

        match compile_stage(&ctx, ShaderStage::Fragment, "fn broken( {") {
            Err(RenderError::ShaderCompile { stage, message }) => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!message.is_empty());
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("invalid WGSL compiled"),
        }
    }

    #[test]
    fn shared_library_compiles() {
        let Some((device, queue)) = super::super::scope::test_device() else {
            return;
        };
        let ctx = RenderCtx::new(&device, &queue, wgpu::TextureFormat::Rgba8Unorm);
        assert!(ShaderLibrary::shared().compile(&ctx).is_ok());
    }

    #[test]
    fn library_is_shared() {
        assert!(std::ptr::eq(ShaderLibrary::shared(), ShaderLibrary::shared()));
        assert!(!ShaderLibrary::shared().version.is_empty());
    }
}
