//! Lookup models
//!
//! This module contains the core data types for postal code lookups:
//! - `types` - Type aliases for common identifiers (ProviderId)
//! - `address` - The canonical address and the race result (Address, LookupResult)

mod address;
mod types;

pub use address::{Address, LookupResult};
pub use types::ProviderId;
