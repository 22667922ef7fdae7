//! BrasilAPI provider.
//!
//! `GET https://brasilapi.com.br/api/cep/v1/{cep}` returns an object whose
//! field names already match the canonical address, except `cep`.
//! Unknown codes are answered with HTTP 404.

use reqwest::Client;
use serde::Deserialize;

use crate::models::Address;
use crate::provider::{AddressSchema, HttpProvider};

/// Provider ID constant
pub const PROVIDER_ID: &str = "BrasilAPI";

pub const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br";

pub const PATH_TEMPLATE: &str = "/api/cep/v1/{cep}";

/// Response body from `/api/cep/v1/{cep}`
///
/// Every field may be missing or `null`; both normalize to an empty string.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BrasilApiAddress {
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub cep: Option<String>,
}

impl AddressSchema for BrasilApiAddress {
    fn into_address(self) -> Address {
        Address {
            street: self.street.unwrap_or_default(),
            neighborhood: self.neighborhood.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            postal_code: self.cep.unwrap_or_default(),
        }
    }
}

/// Build a BrasilAPI provider against `base_url`.
pub fn provider(base_url: impl Into<String>, client: Client) -> HttpProvider<BrasilApiAddress> {
    HttpProvider::new(PROVIDER_ID, base_url, PATH_TEMPLATE, client)
}
