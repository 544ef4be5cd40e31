use wgpu::util::DeviceExt;

use crate::mesh::Mesh;
use crate::render::RenderError;

use super::scope::ErrorCapture;

/// GPU copies of one mesh: positions (slot 0), colors (slot 1) and the two
/// `u32` index lists.
pub struct MeshBuffers {
    pub positions: wgpu::Buffer,
    pub colors: wgpu::Buffer,
    pub line_indices: wgpu::Buffer,
    pub triangle_indices: wgpu::Buffer,
    line_index_count: u32,
    triangle_index_count: u32,
}

impl MeshBuffers {
    pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

    /// Uploads `mesh` to `device`.
    ///
    /// Fails with [`RenderError::BufferUpload`] when a buffer would exceed the
    /// device's `max_buffer_size` or when wgpu reports an allocation or
    /// validation error.
    pub fn upload(device: &wgpu::Device, mesh: &Mesh) -> Result<Self, RenderError> {
        let max = device.limits().max_buffer_size;

        let positions = upload_one(
            device,
            max,
            "position",
            bytemuck::cast_slice(mesh.positions()),
            wgpu::BufferUsages::VERTEX,
        )?;
        let colors = upload_one(
            device,
            max,
            "color",
            bytemuck::cast_slice(mesh.colors()),
            wgpu::BufferUsages::VERTEX,
        )?;
        let line_indices = upload_one(
            device,
            max,
            "line index",
            bytemuck::cast_slice(mesh.line_indices()),
            wgpu::BufferUsages::INDEX,
        )?;
        let triangle_indices = upload_one(
            device,
            max,
            "triangle index",
            bytemuck::cast_slice(mesh.triangle_indices()),
            wgpu::BufferUsages::INDEX,
        )?;

        Ok(Self {
            positions,
            colors,
            line_indices,
            triangle_indices,
            line_index_count: index_count("line index", mesh.line_indices().len())?,
            triangle_index_count: index_count("triangle index", mesh.triangle_indices().len())?,
        })
    }

    #[inline]
    pub fn line_index_count(&self) -> u32 {
        self.line_index_count
    }

    #[inline]
    pub fn triangle_index_count(&self) -> u32 {
        self.triangle_index_count
    }
}

fn upload_one(
    device: &wgpu::Device,
    max_size: u64,
    buffer: &'static str,
    contents: &[u8],
    usage: wgpu::BufferUsages,
) -> Result<wgpu::Buffer, RenderError> {
    check_size(buffer, contents.len(), max_size)?;

    let label = format!("torvis mesh {buffer} buffer");
    let capture = ErrorCapture::begin(device);
    let buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&label),
        contents,
        usage,
    });

    capture.into_result(buf, |message| RenderError::BufferUpload { buffer, message })
}

fn check_size(buffer: &'static str, len: usize, max_size: u64) -> Result<(), RenderError> {
    if len as u64 > max_size {
        return Err(RenderError::BufferUpload {
            buffer,
            message: format!("{len} bytes exceeds the device limit of {max_size} bytes"),
        });
    }
    Ok(())
}

fn index_count(buffer: &'static str, len: usize) -> Result<u32, RenderError> {
    u32::try_from(len).map_err(|_| RenderError::BufferUpload {
        buffer,
        message: format!("{len} indices do not fit a single draw call"),
    })
}
