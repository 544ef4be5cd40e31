use thiserror::Error;

/// Rejected grid parameters.
///
/// Every variant names the offending field so config-file users can find it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be at least {min}, got {value}")]
    CountTooSmall {
        field: &'static str,
        min: i64,
        value: i64,
    },

    #[error("{field} must be a finite number greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field}: color channels must be finite")]
    InvalidColor { field: &'static str },

    /// The grid would need more vertices than a `u32` index can address.
    #[error("grid needs {vertices} vertices; at most {max} are addressable", max = u32::MAX)]
    TooManyVertices { vertices: u128 },
}

impl ConfigError {
    /// Name of the configuration field that failed validation, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::CountTooSmall { field, .. }
            | ConfigError::NotPositive { field, .. }
            | ConfigError::NotFinite { field, .. }
            | ConfigError::InvalidColor { field } => Some(field),
            ConfigError::TooManyVertices { .. } => None,
        }
    }
}
