//! Address provider trait definitions.
//!
//! This module defines the `AddressProvider` trait that the race coordinator
//! drives and the `AddressSchema` trait that maps a provider body into an
//! [`Address`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::errors::ProviderError;
use crate::models::Address;

/// Trait for postal code lookup providers.
///
/// Implement this trait to add a new lookup source. The coordinator only
/// ever sees `Ok` results; an `Err` is logged and otherwise dropped.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use cepfinder_lookup::{Address, AddressProvider, ProviderError};
///
/// struct StaticProvider;
///
/// #[async_trait]
/// impl AddressProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn lookup(&self, cep: &str) -> Result<Address, ProviderError> {
///         Ok(Address {
///             postal_code: cep.to_string(),
///             ..Address::default()
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait AddressProvider: Send + Sync {
    /// Label reported as the `source` of a winning lookup.
    fn id(&self) -> &'static str;

    /// Fetch and normalize the address for a postal code.
    ///
    /// The postal code is already trimmed and known to be non-empty.
    async fn lookup(&self, cep: &str) -> Result<Address, ProviderError>;
}

/// A provider response body that can be normalized into an [`Address`].
pub trait AddressSchema: DeserializeOwned + Send {
    /// Map the provider fields onto the canonical address.
    ///
    /// Total: every decoded body yields an address.
    fn into_address(self) -> Address;

    /// Whether the body is the provider's "unknown postal code" marker.
    fn is_not_found(&self) -> bool {
        false
    }
}
