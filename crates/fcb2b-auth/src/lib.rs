//! HMAC-SHA256 request signing for fcB2B services.
//!
//! Every call to an fcB2B service is an HTTP GET whose query string carries a
//! `Signature` parameter. This crate produces that signature:
//!
//! 1. [`canonical`] sorts the parameters by name and percent-encodes them per
//!    RFC 3986, then builds the four-line string to sign.
//! 2. [`signer`] computes HMAC-SHA256 over it, Base64-encodes the digest and
//!    percent-encodes the result.
//! 3. [`url`] appends the signature to `https://{host}{path}?{query}`.
//!
//! [`sign_request`] runs all three for a [`RequestDescription`]. Every step is
//! a pure function; nothing is cached between calls.
//!
//! # Usage
//!
//! ```rust
//! use fcb2b_auth::{RequestDescription, sign_request};
//! use fcb2b_core::{ApiKey, SecretKey, SigningConfig};
//!
//! let config = SigningConfig::new(ApiKey::default(), SecretKey::from("yoursecretkey"));
//! let request = RequestDescription::from_service_url("https://example.com/svc/StockCheck")
//!     .unwrap()
//!     .with_fresh_standard_params(&config.api_key)
//!     .with_param("SupplierItemSKU", "ABC 123");
//!
//! let signed = sign_request(&request, &config).unwrap();
//! assert!(signed.url.contains("&Signature="));
//! ```

pub mod canonical;
pub mod error;
pub mod params;
pub mod request;
pub mod signer;
pub mod url;

pub use canonical::{CanonicalRequest, canonicalize};
pub use error::{AuthError, AuthResult};
pub use params::ParameterSet;
pub use request::{RequestDescription, SignedRequest, sign_request};
pub use signer::sign;
pub use url::assemble;
