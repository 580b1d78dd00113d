//! Configuration for the signing pipeline.
//!
//! Configuration is an explicit object handed to each signing call. Binaries
//! build it from environment variables; tests and library callers build it
//! directly.

use std::path::PathBuf;

use crate::types::{ApiKey, SecretKey};

/// Everything a signing call needs beyond the request itself.
#[derive(Debug, Clone)]
pub struct SigningConfig {
    /// Value sent as the `apiKey` query parameter.
    pub api_key: ApiKey,
    /// HMAC key shared with the server.
    pub secret_key: SecretKey,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Optional JSON file overriding the built-in service requirement table.
    pub requirements_file: Option<PathBuf>,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            secret_key: SecretKey::default(),
            log_level: "info".to_owned(),
            requirements_file: None,
        }
    }
}

impl SigningConfig {
    /// Create a configuration with the given credentials and default settings.
    #[must_use]
    pub fn new(api_key: ApiKey, secret_key: SecretKey) -> Self {
        Self {
            api_key,
            secret_key,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("FCB2B_API_KEY") {
            config.api_key = ApiKey::new(v);
        }
        if let Some(v) = lookup("FCB2B_SECRET_KEY") {
            config.secret_key = SecretKey::from(v);
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("FCB2B_REQUIREMENTS_FILE") {
            if !v.is_empty() {
                config.requirements_file = Some(PathBuf::from(v));
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = SigningConfig::default();
        assert_eq!(config.api_key.as_str(), "anonymous");
        assert!(config.secret_key.is_empty());
        assert_eq!(config.log_level, "info");
        assert!(config.requirements_file.is_none());
    }

    #[test]
    fn test_should_override_defaults_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("FCB2B_API_KEY", "partner-42"),
            ("FCB2B_SECRET_KEY", "s3cr3t"),
            ("LOG_LEVEL", "debug"),
            ("FCB2B_REQUIREMENTS_FILE", "/etc/fcb2b/requirements.json"),
        ]
        .into_iter()
        .collect();

        let config = SigningConfig::from_lookup(|name| vars.get(name).map(|v| (*v).to_owned()));
        assert_eq!(config.api_key.as_str(), "partner-42");
        assert_eq!(config.secret_key.as_bytes(), b"s3cr3t");
        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.requirements_file,
            Some(PathBuf::from("/etc/fcb2b/requirements.json"))
        );
    }

    #[test]
    fn test_should_not_render_secret_in_config_debug() {
        let config = SigningConfig::new(ApiKey::default(), SecretKey::from("hunter2"));
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
