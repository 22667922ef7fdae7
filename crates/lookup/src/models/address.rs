use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::ProviderId;

/// Canonical address every provider normalizes into.
///
/// Fields are never validated. A field the provider omitted is an empty
/// string, not `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street name (logradouro)
    pub street: String,

    /// Neighborhood (bairro)
    pub neighborhood: String,

    /// City (localidade)
    pub city: String,

    /// State, usually a two-letter code such as "SP"
    pub state: String,

    /// Postal code as echoed by the provider
    pub postal_code: String,
}

/// A successful lookup: the address plus the provider that won the race.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LookupResult {
    /// Label of the provider that answered first
    pub source: ProviderId,

    /// The normalized address
    #[serde(flatten)]
    pub address: Address,

    /// Time from launching the race to receiving this result
    #[serde(skip)]
    pub elapsed: Duration,
}

impl LookupResult {
    pub fn new(source: ProviderId, address: Address, elapsed: Duration) -> Self {
        Self {
            source,
            address,
            elapsed,
        }
    }
}
