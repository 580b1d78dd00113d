//! Core types, configuration, and service requirements for fcB2B request signing.
//!
//! This crate holds the pieces shared by the signing pipeline and the binaries
//! that drive it: the explicit [`SigningConfig`] object, key material types that
//! never leak through `Debug`, and the declarative [`ServiceRequirements`] table
//! mapping a service name to the query parameters it requires.

mod config;
mod error;
pub mod requirements;
mod types;

pub use config::SigningConfig;
pub use error::{CoreError, CoreResult};
pub use requirements::ServiceRequirements;
pub use types::{ApiKey, SecretKey, ServiceName};
