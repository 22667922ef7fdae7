//! Error types for the lookup crate.
//!
//! This module provides:
//! - [`LookupError`]: The only failures a caller of the race can observe
//! - [`ProviderError`]: Per-provider failure reasons, absorbed by the race

use std::time::Duration;

use thiserror::Error;

/// Errors returned by [`RaceCoordinator::resolve`](crate::RaceCoordinator::resolve).
#[derive(Error, Debug)]
pub enum LookupError {
    /// The postal code was empty (or only whitespace).
    /// Detected before any network call is issued.
    #[error("Invalid postal code: {0:?}")]
    InvalidInput(String),

    /// No provider produced an address before the deadline.
    ///
    /// Also returned when every provider failed early: slow and broken
    /// providers are indistinguishable to the caller.
    #[error("No provider responded within {timeout:?}")]
    Timeout {
        /// The deadline that was applied to the race
        timeout: Duration,
    },

    /// The coordinator has no providers registered.
    #[error("No providers available")]
    NoProvidersAvailable,

    /// The shared HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Why a single provider failed to produce an address.
///
/// Never surfaced by the race itself; the coordinator logs it and moves on.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request could not be sent or the body could not be read.
    #[error("Request failed: {provider} - {message}")]
    Request {
        /// The provider that failed
        provider: String,
        /// The transport error message
        message: String,
    },

    /// The provider answered with a non-success status code.
    #[error("Unexpected status from {provider}: {status}")]
    Status {
        /// The provider that failed
        provider: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// The body was not a JSON object of the expected shape.
    #[error("Decode failed: {provider} - {message}")]
    Decode {
        /// The provider that failed
        provider: String,
        /// The decoder error message
        message: String,
    },

    /// The provider answered successfully but flagged the code as unknown.
    #[error("Postal code not found by {provider}")]
    NotFound {
        /// The provider that failed
        provider: String,
    },
}

impl ProviderError {
    /// Label of the provider that produced this error.
    pub fn provider(&self) -> &str {
        match self {
            Self::Request { provider, .. }
            | Self::Status { provider, .. }
            | Self::Decode { provider, .. }
            | Self::NotFound { provider } => provider,
        }
    }
}
