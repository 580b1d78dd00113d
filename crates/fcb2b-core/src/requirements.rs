//! Declarative per-service parameter requirements.
//!
//! Every fcB2B service accepts the same three standard parameters. Some
//! services additionally require item-level parameters. The table here maps a
//! service name to those extra names so callers can check a request before it
//! is signed, without the signing pipeline knowing anything about services.
//!
//! A table can be loaded from JSON:
//!
//! ```json
//! {
//!   "standard": ["GlobalIdentifier", "TimeStamp", "apiKey"],
//!   "services": { "StockCheck": ["SupplierItemSKU"] }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreResult;
use crate::types::ServiceName;

/// Fresh UUID identifying one request.
pub const GLOBAL_IDENTIFIER: &str = "GlobalIdentifier";
/// UTC request time, `YYYY-MM-DDTHH:MM:SSZ`.
pub const TIME_STAMP: &str = "TimeStamp";
/// Caller's API key.
pub const API_KEY: &str = "apiKey";
/// Supplier item number used by the inventory services.
pub const SUPPLIER_ITEM_SKU: &str = "SupplierItemSKU";
/// Query parameter carrying the signature. Never a request parameter.
pub const SIGNATURE: &str = "Signature";

/// Services that look up a single item by `SupplierItemSKU`.
const ITEM_SERVICES: &[&str] = &["InventoryInquiry", "RelatedItems", "StockCheck"];

fn default_standard() -> Vec<String> {
    [GLOBAL_IDENTIFIER, TIME_STAMP, API_KEY]
        .iter()
        .map(|s| (*s).to_owned())
        .collect()
}

/// Mapping from service name to the parameter names it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequirements {
    /// Parameters every service requires.
    #[serde(default = "default_standard")]
    pub standard: Vec<String>,
    /// Extra parameters per service.
    #[serde(default)]
    pub services: BTreeMap<ServiceName, Vec<String>>,
}

impl Default for ServiceRequirements {
    fn default() -> Self {
        let services = ITEM_SERVICES
            .iter()
            .map(|name| (ServiceName::new(*name), vec![SUPPLIER_ITEM_SKU.to_owned()]))
            .collect();
        Self {
            standard: default_standard(),
            services,
        }
    }
}

impl ServiceRequirements {
    /// Parse a requirement table from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a requirement table from a JSON file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read requirements file {}", path.display()))?;
        let requirements = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            services = requirements.services.len(),
            "Loaded service requirements"
        );
        Ok(requirements)
    }

    /// Load the table named by `path`, or the built-in table when `path` is `None`.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// All parameter names `service` requires, standard ones first.
    ///
    /// Unknown services require only the standard parameters.
    #[must_use]
    pub fn required_for(&self, service: &ServiceName) -> Vec<&str> {
        let extra = self.services.get(service).map_or(&[][..], Vec::as_slice);
        self.standard
            .iter()
            .chain(extra)
            .map(String::as_str)
            .collect()
    }

    /// Whether the table lists service-specific parameters for `service`.
    #[must_use]
    pub fn is_known(&self, service: &ServiceName) -> bool {
        self.services.contains_key(service)
    }
}
