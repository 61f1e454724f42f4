use std::path::PathBuf;

/// Unified error type for the cadcommand crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Arguments rejected before reaching the backend.
    #[error("{0}")]
    InvalidInput(String),

    /// The drawing backend could not be started or reached.
    #[error("CAD not initialized")]
    NotInitialized,

    /// The backend accepted the call but failed to carry it out.
    #[error("{0}")]
    Backend(String),

    #[error("not implemented")]
    NotImplemented,

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
