//! Canonical request construction for fcB2B signed GET requests.
//!
//! The string to sign is four lines joined by a single `\n`:
//!
//! ```text
//! GET\n
//! Host\n
//! Path\n
//! CanonicalQueryString
//! ```
//!
//! The canonical query string lists every parameter as `name=value`, sorted by
//! raw parameter name in byte order, with both sides percent-encoded per
//! RFC 3986. The server rebuilds the same bytes to verify the signature, so
//! the encoding here must not drift: uppercase hex digits, `%20` for space,
//! UTF-8 bytes for non-ASCII text.

use fcb2b_core::requirements::SIGNATURE;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use crate::error::{AuthError, AuthResult};
use crate::params::ParameterSet;

/// The only HTTP method this signer produces.
pub const METHOD: &str = "GET";

/// Everything except RFC 3986 unreserved characters
/// (A-Z, a-z, 0-9, `-`, `_`, `.`, `~`) is percent-encoded.
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The canonical form of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// Sorted, percent-encoded `name=value` pairs joined by `&`.
    pub query: String,
    /// The exact bytes fed to HMAC-SHA256.
    pub string_to_sign: String,
}

/// Canonicalize a request into its query string and string to sign.
///
/// # Examples
///
/// ```
/// use fcb2b_auth::canonical::canonicalize;
/// use fcb2b_auth::ParameterSet;
///
/// let params: ParameterSet = [("b", "2"), ("a", "x y")].into_iter().collect();
/// let canonical = canonicalize("example.com", "/svc", &params).unwrap();
/// assert_eq!(canonical.query, "a=x%20y&b=2");
/// assert_eq!(canonical.string_to_sign, "GET\nexample.com\n/svc\na=x%20y&b=2");
/// ```
pub fn canonicalize(
    host: &str,
    path: &str,
    params: &ParameterSet,
) -> AuthResult<CanonicalRequest> {
    validate_host(host)?;
    validate_path(path)?;
    validate_params(params)?;

    let query = build_canonical_query_string(params);
    let string_to_sign = build_string_to_sign(host, path, &query);

    debug!(host, path, params = params.len(), "Canonicalized request");

    Ok(CanonicalRequest {
        query,
        string_to_sign,
    })
}

/// Build the canonical query string from a parameter set.
///
/// Performs no validation; [`canonicalize`] is the checked entry point.
///
/// # Examples
///
/// ```
/// use fcb2b_auth::canonical::build_canonical_query_string;
/// use fcb2b_auth::ParameterSet;
///
/// let params: ParameterSet = [("TimeStamp", "2024-01-01T00:00:00Z")].into_iter().collect();
/// assert_eq!(
///     build_canonical_query_string(&params),
///     "TimeStamp=2024-01-01T00%3A00%3A00Z"
/// );
/// ```
#[must_use]
pub fn build_canonical_query_string(params: &ParameterSet) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Join method, host, path and canonical query with `\n`, no trailing newline.
#[must_use]
pub fn build_string_to_sign(host: &str, path: &str, canonical_query: &str) -> String {
    format!("{METHOD}\n{host}\n{path}\n{canonical_query}")
}

/// Percent-encode `input` per RFC 3986 with uppercase hex digits.
///
/// # Examples
///
/// ```
/// use fcb2b_auth::canonical::percent_encode;
///
/// assert_eq!(percent_encode("a b+c/d=e"), "a%20b%2Bc%2Fd%3De");
/// assert_eq!(percent_encode("Az09-_.~"), "Az09-_.~");
/// ```
#[must_use]
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_ENCODE_SET).to_string()
}

/// Check that `host` is a non-empty URL authority.
fn validate_host(host: &str) -> AuthResult<()> {
    if host.is_empty() {
        return Err(AuthError::InvalidParameter("host is empty".to_owned()));
    }
    if let Some(c) = host
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '/' | '?' | '#'))
    {
        return Err(AuthError::InvalidParameter(format!(
            "host {host:?} contains illegal character {c:?}"
        )));
    }
    Ok(())
}

/// Check that `path` is a non-empty absolute URL path without query or fragment.
fn validate_path(path: &str) -> AuthResult<()> {
    if path.is_empty() {
        return Err(AuthError::InvalidParameter("path is empty".to_owned()));
    }
    if !path.starts_with('/') {
        return Err(AuthError::InvalidParameter(format!(
            "path {path:?} must start with '/'"
        )));
    }
    if let Some(c) = path
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || matches!(c, '?' | '#'))
    {
        return Err(AuthError::InvalidParameter(format!(
            "path {path:?} contains illegal character {c:?}"
        )));
    }
    Ok(())
}

/// Reject empty names and the reserved `Signature` name.
fn validate_params(params: &ParameterSet) -> AuthResult<()> {
    for (name, _) in params.iter() {
        if name.is_empty() {
            return Err(AuthError::InvalidParameter(
                "parameter name is empty".to_owned(),
            ));
        }
        if name == SIGNATURE {
            return Err(AuthError::InvalidParameter(format!(
                "{SIGNATURE} is reserved for the request signature"
            )));
        }
    }
    Ok(())
}
