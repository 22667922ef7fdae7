//! Address provider abstractions and implementations.
//!
//! This module contains:
//! - The `AddressProvider` trait the race coordinator drives
//! - The `AddressSchema` trait describing a provider wire format
//! - `HttpProvider`, the one adapter type shared by all HTTP providers
//! - Concrete provider definitions (BrasilAPI, ViaCEP)
//!
//! # Architecture
//!
//! Providers differ only in their endpoint, their response schema and their
//! label. Fetching, status handling and decoding live once in
//! [`HttpProvider`]; a provider module contributes a schema type and the
//! constants needed to build an `HttpProvider` for it.

mod http;
mod traits;

pub mod brasil_api;
pub mod via_cep;

// Re-exports
pub use http::HttpProvider;
pub use traits::{AddressProvider, AddressSchema};
