use crate::render::RenderError;

/// Captures wgpu validation and out-of-memory errors raised by the calls made
/// between [`ErrorCapture::begin`] and [`ErrorCapture::finish`].
///
/// Without a scope wgpu hands such errors to the device's uncaptured-error
/// handler, which panics by default.
pub(super) struct ErrorCapture {
    validation: wgpu::ErrorScopeGuard,
    out_of_memory: wgpu::ErrorScopeGuard,
}

impl ErrorCapture {
    pub(super) fn begin(device: &wgpu::Device) -> Self {
        let validation = device.push_error_scope(wgpu::ErrorFilter::Validation);
        let out_of_memory = device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        Self {
            validation,
            out_of_memory,
        }
    }

    /// Pops both scopes (innermost first) and returns the first error, if any.
    pub(super) fn finish(self) -> Option<String> {
        let oom = pollster::block_on(self.out_of_memory.pop());
        let validation = pollster::block_on(self.validation.pop());
        oom.or(validation).map(|e| e.to_string())
    }

    /// Pops the scopes; `value` is only handed out if nothing was captured.
    pub(super) fn into_result<T>(
        self,
        value: T,
        err: impl FnOnce(String) -> RenderError,
    ) -> Result<T, RenderError> {
        captured_to_result(self.finish(), value, err)
    }
}

fn captured_to_result<T>(
    captured: Option<String>,
    value: T,
    err: impl FnOnce(String) -> RenderError,
) -> Result<T, RenderError> {
    match captured {
        Some(message) => Err(err(message)),
        None => Ok(value),
    }
}

/// Headless device for tests; `None` on machines without a usable adapter.
#[cfg(test)]
pub(super) fn test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::LowPower,
        compatible_surface: None,
        force_fallback_adapter: false,
    }))
    .ok()?;
    pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default())).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ShaderStage;

    #[test]
    fn captured_error_replaces_value() {
        let r = captured_to_result(Some("bad".to_string()), 7, |message| {
            RenderError::ShaderCompile {
                stage: ShaderStage::Vertex,
                message,
            }
        });
        match r {
            Err(RenderError::ShaderCompile { stage, message }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert_eq!(message, "bad");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn nothing_captured_keeps_value() {
        let r = captured_to_result(None, 7, |message| RenderError::ShaderLink { message });
        assert_eq!(r.unwrap(), 7);
    }

    #[test]
    fn scope_catches_validation_error() {
        let Some((device, _queue)) = test_device() else {
            return;
        };

        let capture = ErrorCapture::begin(&device);
        let _ = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("unaligned mapped buffer"),
            size: 3,
            usage: wgpu::BufferUsages::VERTEX,
            mapped_at_creation: true,
        });
        let r = capture.into_result((), |message| RenderError::BufferUpload {
            buffer: "test",
            message,
        });
        assert!(matches!(r, Err(RenderError::BufferUpload { buffer: "test", .. })));
    }
}
