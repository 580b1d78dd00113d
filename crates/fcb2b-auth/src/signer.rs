//! HMAC-SHA256 request signatures.
//!
//! ```text
//! Signature = PercentEncode(Base64(HMAC-SHA256(SecretKey, StringToSign)))
//! ```
//!
//! Standard Base64 emits `+`, `/` and `=`, none of which may appear raw in a
//! query string, so the Base64 text is percent-encoded once more.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use fcb2b_core::SecretKey;
use hmac::{Hmac, KeyInit, Mac};
use sha2::Sha256;

use crate::canonical::percent_encode;
use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Sign `string_to_sign` and return the signature ready for a query string.
///
/// The input is used byte for byte; no normalization is applied.
///
/// # Examples
///
/// ```
/// use fcb2b_auth::signer::sign;
/// use fcb2b_core::SecretKey;
///
/// let signature = sign("GET\nexample.com\n/svc\n", &SecretKey::from("key")).unwrap();
/// assert!(!signature.contains(['+', '/', '=']));
/// ```
pub fn sign(string_to_sign: &str, secret_key: &SecretKey) -> AuthResult<String> {
    let signature = compute_signature(string_to_sign, secret_key)?;
    Ok(percent_encode(&signature))
}

/// Compute Base64(HMAC-SHA256(secret, string_to_sign)) without URL encoding.
fn compute_signature(string_to_sign: &str, secret_key: &SecretKey) -> AuthResult<String> {
    if secret_key.is_empty() {
        return Err(AuthError::Signing("secret key is empty".to_owned()));
    }
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|_| AuthError::Signing("secret key rejected by HMAC-SHA256".to_owned()))?;
    mac.update(string_to_sign.as_bytes());
    let result = mac.finalize().into_bytes();
    Ok(BASE64.encode(result))
}
