//! Cepfinder Lookup Crate
//!
//! This crate resolves a Brazilian postal code (CEP) to a normalized address
//! by racing several remote lookup providers and keeping the first answer.
//!
//! # Overview
//!
//! The lookup crate supports:
//! - Multiple providers: BrasilAPI and ViaCEP out of the box
//! - One canonical [`Address`] shape regardless of the provider wire schema
//! - A single wall-clock deadline per lookup
//!
//! # Architecture
//!
//! ```text
//!                          +------------------+
//!                          |  Caller (CLI)    |
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | RaceCoordinator  |  (first wins, bounded wait)
//!                          +------------------+
//!                            |              |
//!                            v              v
//!                  +--------------+  +--------------+
//!                  |  BrasilAPI   |  |    ViaCEP    |  (HttpProvider<S>)
//!                  +--------------+  +--------------+
//!                            |              |
//!                            v              v
//!                          +------------------+
//!                          |     Address      |  (canonical model)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Address`] - Normalized address, empty strings for missing fields
//! - [`LookupResult`] - Winning address paired with its provider label
//! - [`RaceCoordinator`] - Launches providers concurrently and picks the first
//! - [`AddressProvider`] - Trait every provider adapter implements
//! - [`LookupConfig`] - Timeouts and provider base URLs

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;
pub mod race;

pub use config::LookupConfig;
pub use errors::{LookupError, ProviderError};
pub use models::{Address, LookupResult, ProviderId};
pub use provider::brasil_api::BrasilApiAddress;
pub use provider::via_cep::ViaCepAddress;
pub use provider::{AddressProvider, AddressSchema, HttpProvider};
pub use race::{resolve, RaceCoordinator};
