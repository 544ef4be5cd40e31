use thiserror::Error;

/// Shader stage a compile error belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Failure while preparing a mesh instance for drawing.
///
/// Every variant is fatal for the instance that produced it and for nothing
/// else.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{stage} shader failed to compile: {message}")]
    ShaderCompile { stage: ShaderStage, message: String },

    #[error("shader program failed to link: {message}")]
    ShaderLink { message: String },

    #[error("failed to upload {buffer} buffer: {message}")]
    BufferUpload {
        buffer: &'static str,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_part() {
        let e = RenderError::ShaderCompile {
            stage: ShaderStage::Fragment,
            message: "bad token".into(),
        };
        assert_eq!(e.to_string(), "fragment shader failed to compile: bad token");

        let e = RenderError::BufferUpload {
            buffer: "line index",
            message: "out of memory".into(),
        };
        assert_eq!(e.to_string(), "failed to upload line index buffer: out of memory");
    }
}
