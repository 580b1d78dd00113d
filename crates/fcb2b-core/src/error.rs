//! Error types for the fcB2B core.

/// Core error type for configuration and requirement loading.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A service requirement table could not be parsed.
    #[error("invalid service requirements: {0}")]
    InvalidRequirements(#[from] serde_json::Error),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
