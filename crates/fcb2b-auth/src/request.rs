//! Typed request descriptions and the end-to-end signing pipeline.
//!
//! A [`RequestDescription`] carries the host, path and parameters of one
//! service call. [`sign_request`] runs it through canonicalization, signing
//! and URL assembly and returns a [`SignedRequest`] ready for an HTTP client.

use std::fmt;

use chrono::{DateTime, Utc};
use fcb2b_core::requirements::{API_KEY, GLOBAL_IDENTIFIER, TIME_STAMP};
use fcb2b_core::{ApiKey, ServiceName, ServiceRequirements, SigningConfig};
use tracing::debug;
use uuid::Uuid;

use crate::canonical::{CanonicalRequest, canonicalize};
use crate::error::{AuthError, AuthResult};
use crate::params::ParameterSet;
use crate::signer::sign;
use crate::url::assemble;

/// Wire format of the `TimeStamp` parameter.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a UTC instant as a `TimeStamp` parameter value.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use fcb2b_auth::request::format_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// assert_eq!(format_timestamp(ts), "2024-01-01T00:00:00Z");
/// ```
#[must_use]
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// One GET request to an fcB2B service, before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescription {
    host: String,
    path: String,
    params: ParameterSet,
}

impl RequestDescription {
    /// Describe a request to `path` on `host` with no parameters yet.
    #[must_use]
    pub fn new(host: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            path: path.into(),
            params: ParameterSet::new(),
        }
    }

    /// Describe a request to an absolute `https://host/path` service URL.
    ///
    /// The URL is split into its authority (port included) and path. URLs
    /// with another scheme, user info, a query, or a fragment are rejected;
    /// `http://` catalog entries are not silently upgraded to `https://`.
    ///
    /// A bare host such as `https://example.com` gets the path `/`, so the
    /// string to sign carries `/` on its path line rather than an empty line.
    pub fn from_service_url(url: &str) -> AuthResult<Self> {
        let invalid = || AuthError::InvalidServiceUrl(url.to_owned());

        if url.contains('#') {
            return Err(invalid());
        }
        let uri: http::Uri = url.parse().map_err(|_| invalid())?;
        if uri.scheme_str() != Some("https") || uri.query().is_some() {
            return Err(invalid());
        }
        let authority = uri.authority().ok_or_else(invalid)?.as_str();
        if authority.is_empty() || authority.contains('@') {
            return Err(invalid());
        }

        Ok(Self::new(authority, uri.path()))
    }

    /// Target host, including any port.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Target path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Parameters collected so far.
    #[must_use]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    /// Mutable access to the parameters.
    pub fn params_mut(&mut self) -> &mut ParameterSet {
        &mut self.params
    }

    /// Add or replace one parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Add the `GlobalIdentifier`, `TimeStamp` and `apiKey` parameters.
    #[must_use]
    pub fn with_standard_params(
        mut self,
        api_key: &ApiKey,
        timestamp: DateTime<Utc>,
        global_identifier: Uuid,
    ) -> Self {
        self.params
            .insert(GLOBAL_IDENTIFIER, global_identifier.to_string());
        self.params.insert(TIME_STAMP, format_timestamp(timestamp));
        self.params.insert(API_KEY, api_key.as_str());
        self
    }

    /// Add the standard parameters with the current time and a new UUID v4.
    #[must_use]
    pub fn with_fresh_standard_params(self, api_key: &ApiKey) -> Self {
        self.with_standard_params(api_key, Utc::now(), Uuid::new_v4())
    }

    /// Check that every parameter `service` requires is present and non-empty.
    pub fn validate(
        &self,
        requirements: &ServiceRequirements,
        service: &ServiceName,
    ) -> AuthResult<()> {
        for name in requirements.required_for(service) {
            match self.params.get(name) {
                Some(value) if !value.is_empty() => {}
                Some(_) => {
                    return Err(AuthError::InvalidParameter(format!(
                        "{service} requires a non-empty {name}"
                    )));
                }
                None => {
                    return Err(AuthError::InvalidParameter(format!(
                        "{service} requires {name}"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The result of signing one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Canonical query and string to sign the signature was computed over.
    pub canonical: CanonicalRequest,
    /// Fully qualified URL to fetch with GET.
    pub url: String,
}

impl fmt::Display for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Canonicalize, sign and assemble `request` with the key in `config`.
///
/// # Examples
///
/// ```
/// use fcb2b_auth::{RequestDescription, sign_request};
/// use fcb2b_core::{ApiKey, SecretKey, SigningConfig};
///
/// let config = SigningConfig::new(ApiKey::default(), SecretKey::from("yoursecretkey"));
/// let request = RequestDescription::new("example.com", "/svc/Check")
///     .with_param("SupplierItemSKU", "ABC 123");
/// let signed = sign_request(&request, &config).unwrap();
/// assert!(signed.url.starts_with("https://example.com/svc/Check?SupplierItemSKU=ABC%20123&Signature="));
/// ```
pub fn sign_request(
    request: &RequestDescription,
    config: &SigningConfig,
) -> AuthResult<SignedRequest> {
    let canonical = canonicalize(&request.host, &request.path, &request.params)?;

    debug!(string_to_sign = ?canonical.string_to_sign, "Built string to sign");

    let signature = sign(&canonical.string_to_sign, &config.secret_key)?;
    let url = assemble(&request.host, &request.path, &canonical.query, &signature)?;

    debug!(host = %request.host, path = %request.path, "Signed request");

    Ok(SignedRequest { canonical, url })
}
