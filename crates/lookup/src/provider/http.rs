//! Generic HTTP provider adapter.
//!
//! One GET per lookup, no retries. Any transport error, non-success status,
//! undecodable body or "not found" marker becomes a [`ProviderError`].

use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::errors::ProviderError;
use crate::models::Address;

use super::traits::{AddressProvider, AddressSchema};

/// Placeholder substituted with the URL-encoded postal code.
const CEP_PLACEHOLDER: &str = "{cep}";

/// HTTP provider parametrized by its response schema.
///
/// # Example
///
/// ```ignore
/// use cepfinder_lookup::provider::{brasil_api, HttpProvider};
///
/// let provider: HttpProvider<brasil_api::BrasilApiAddress> = HttpProvider::new(
///     brasil_api::PROVIDER_ID,
///     brasil_api::DEFAULT_BASE_URL,
///     brasil_api::PATH_TEMPLATE,
///     reqwest::Client::new(),
/// );
/// ```
pub struct HttpProvider<S> {
    id: &'static str,
    base_url: String,
    path_template: &'static str,
    client: Client,
    schema: PhantomData<fn() -> S>,
}

impl<S: AddressSchema> HttpProvider<S> {
    pub fn new(
        id: &'static str,
        base_url: impl Into<String>,
        path_template: &'static str,
        client: Client,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            id,
            base_url,
            path_template,
            client,
            schema: PhantomData,
        }
    }

    /// Full request URL for a postal code.
    pub fn endpoint(&self, cep: &str) -> String {
        let path = self
            .path_template
            .replace(CEP_PLACEHOLDER, &urlencoding::encode(cep));
        format!("{}{}", self.base_url, path)
    }

    fn request_error(&self, e: reqwest::Error) -> ProviderError {
        ProviderError::Request {
            provider: self.id.to_string(),
            message: e.to_string(),
        }
    }
}

#[async_trait]
impl<S: AddressSchema + 'static> AddressProvider for HttpProvider<S> {
    fn id(&self) -> &'static str {
        self.id
    }

    async fn lookup(&self, cep: &str) -> Result<Address, ProviderError> {
        let url = self.endpoint(cep);
        debug!("{} request: {}", self.id, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                provider: self.id.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.request_error(e))?;

        let schema: S = decode_object(self.id, &body)?;

        if schema.is_not_found() {
            return Err(ProviderError::NotFound {
                provider: self.id.to_string(),
            });
        }

        Ok(schema.into_address())
    }
}

/// Decode a body that must be a JSON object.
///
/// Derived struct deserializers also accept arrays (fields by position), so
/// the object shape is checked before mapping onto `S`.
pub(crate) fn decode_object<S: AddressSchema>(
    provider: &str,
    body: &[u8],
) -> Result<S, ProviderError> {
    let decode_error = |message: String| ProviderError::Decode {
        provider: provider.to_string(),
        message,
    };

    match serde_json::from_slice::<Value>(body).map_err(|e| decode_error(e.to_string()))? {
        object @ Value::Object(_) => {
            serde_json::from_value(object).map_err(|e| decode_error(e.to_string()))
        }
        other => Err(decode_error(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
