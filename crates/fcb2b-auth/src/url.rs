//! Signed URL assembly.

use fcb2b_core::requirements::SIGNATURE;

use crate::error::{AuthError, AuthResult};

/// Compose `https://{host}{path}?{query}&Signature={signature}`.
///
/// All components are concatenated as given; nothing is re-encoded. An empty
/// query still yields `?&Signature=...`, which is what the server signs over.
///
/// # Examples
///
/// ```
/// use fcb2b_auth::url::assemble;
///
/// let url = assemble("example.com", "/svc", "a=1", "abc%3D").unwrap();
/// assert_eq!(url, "https://example.com/svc?a=1&Signature=abc%3D");
/// ```
pub fn assemble(
    host: &str,
    path: &str,
    canonical_query: &str,
    encoded_signature: &str,
) -> AuthResult<String> {
    if host.is_empty() {
        return Err(AuthError::Assembly("host is empty".to_owned()));
    }
    if path.is_empty() {
        return Err(AuthError::Assembly("path is empty".to_owned()));
    }
    if encoded_signature.is_empty() {
        return Err(AuthError::Assembly("signature is empty".to_owned()));
    }

    Ok(format!(
        "https://{host}{path}?{canonical_query}&{SIGNATURE}={encoded_signature}"
    ))
}
