//! Signing error types.
//!
//! No variant ever carries key material or digest bytes.

/// Errors produced by the signing pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// A parameter, host, or path is missing or malformed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The secret key is missing or the MAC primitive rejected it.
    #[error("signing failed: {0}")]
    Signing(String),

    /// A component required to compose the signed URL is missing.
    #[error("cannot assemble signed URL: {0}")]
    Assembly(String),

    /// A service URL could not be split into host and path.
    #[error("invalid service URL {0:?}")]
    InvalidServiceUrl(String),
}

/// Convenience result type for signing operations.
pub type AuthResult<T> = Result<T, AuthError>;
