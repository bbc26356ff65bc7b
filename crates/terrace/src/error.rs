//! Error types for terrain generation.

use thiserror::Error;

/// Errors that can occur while configuring or running a generation pass.
#[derive(Debug, Error)]
pub enum TerraceError {
    /// A config field is outside its valid range.
    #[error("invalid config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// A theme was built without any bands.
    #[error("theme '{0}' has no color bands")]
    EmptyTheme(String),

    /// No registered theme has this name.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// No noise kind has this name.
    #[error("unknown noise kind: {0}")]
    UnknownNoise(String),

    /// Walls pushed the mesh past what a `u32` index buffer can address.
    #[error("mesh has {vertices} vertices, more than u32 indices can address")]
    MeshTooLarge { vertices: usize },

    /// The background worker exited without delivering a mesh.
    #[error("generation worker disconnected before finishing")]
    WorkerDisconnected,
}

pub type Result<T> = std::result::Result<T, TerraceError>;
