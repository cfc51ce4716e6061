use thiserror::Error;

/// Errors raised by `ParticleField` lifecycle operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("particle grid must be non-empty (got {resolution_x} x {resolution_z})")]
    EmptyGrid {
        resolution_x: u32,
        resolution_z: u32,
    },

    #[error("particle field has been disposed")]
    Disposed,
}

/// Errors reading or writing a settings document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse settings: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors a render backend reports for a single frame. None of them stop the
/// frame loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("render surface lost or outdated")]
    SurfaceLost,

    #[error("render device out of memory")]
    OutOfMemory,

    #[error("render backend error: {0}")]
    Backend(String),
}

pub type FieldResult<T> = std::result::Result<T, FieldError>;
