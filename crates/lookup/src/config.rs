//! Lookup configuration.
//!
//! Holds the race deadline, the per-request bound and the provider base
//! URLs. Defaults point at the public endpoints; tests override the URLs to
//! target a local mock server.

use std::time::Duration;

use crate::provider::{brasil_api, via_cep};

/// Default race deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Default bound on a single provider request.
///
/// Longer than the race deadline: it only exists so that a losing request
/// cannot keep its connection open forever.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for one [`RaceCoordinator`](crate::RaceCoordinator).
///
/// Built from defaults, from `CEP_*` environment variables, or through the
/// `with_*` builders.
#[derive(Clone, Debug)]
pub struct LookupConfig {
    /// Wall-clock deadline for the whole race
    pub timeout: Duration,

    /// Upper bound on each individual provider request
    pub request_timeout: Duration,

    /// Base URL for BrasilAPI (scheme and host, no trailing path)
    pub brasil_api_url: String,

    /// Base URL for ViaCEP (scheme and host, no trailing path)
    pub via_cep_url: String,

    /// User-Agent header sent to providers
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            brasil_api_url: brasil_api::DEFAULT_BASE_URL.to_string(),
            via_cep_url: via_cep::DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("cepfinder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl LookupConfig {
    /// Build a configuration from `CEP_*` environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout = env_millis("CEP_TIMEOUT_MS").unwrap_or(defaults.timeout);
        let request_timeout =
            env_millis("CEP_REQUEST_TIMEOUT_MS").unwrap_or(defaults.request_timeout);
        let brasil_api_url =
            std::env::var("CEP_BRASILAPI_URL").unwrap_or(defaults.brasil_api_url);
        let via_cep_url = std::env::var("CEP_VIACEP_URL").unwrap_or(defaults.via_cep_url);
        Self {
            timeout,
            request_timeout,
            brasil_api_url,
            via_cep_url,
            user_agent: defaults.user_agent,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn with_brasil_api_url(mut self, url: impl Into<String>) -> Self {
        self.brasil_api_url = url.into();
        self
    }

    pub fn with_via_cep_url(mut self, url: impl Into<String>) -> Self {
        self.via_cep_url = url.into();
        self
    }
}

fn env_millis(key: &str) -> Option<Duration> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_millis)
}
