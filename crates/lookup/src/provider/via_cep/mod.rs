//! ViaCEP provider.
//!
//! `GET https://viacep.com.br/ws/{cep}/json/` returns Portuguese field names.
//! A well-formed but unknown code is answered with HTTP 200 and
//! `{"erro": true}` (older deployments send the string `"true"`).
//! Malformed codes get HTTP 400.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::models::Address;
use crate::provider::{AddressSchema, HttpProvider};

/// Provider ID constant
pub const PROVIDER_ID: &str = "ViaCEP";

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

pub const PATH_TEMPLATE: &str = "/ws/{cep}/json/";

/// Response body from `/ws/{cep}/json/`
///
/// Every field may be missing or `null`; both normalize to an empty string.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViaCepAddress {
    pub logradouro: Option<String>,
    pub bairro: Option<String>,
    pub localidade: Option<String>,
    pub uf: Option<String>,
    pub cep: Option<String>,
    erro: Option<Value>,
}

impl AddressSchema for ViaCepAddress {
    fn into_address(self) -> Address {
        Address {
            street: self.logradouro.unwrap_or_default(),
            neighborhood: self.bairro.unwrap_or_default(),
            city: self.localidade.unwrap_or_default(),
            state: self.uf.unwrap_or_default(),
            postal_code: self.cep.unwrap_or_default(),
        }
    }

    fn is_not_found(&self) -> bool {
        match &self.erro {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

/// Build a ViaCEP provider against `base_url`.
pub fn provider(base_url: impl Into<String>, client: Client) -> HttpProvider<ViaCepAddress> {
    HttpProvider::new(PROVIDER_ID, base_url, PATH_TEMPLATE, client)
}
