//! Race coordination module.
//!
//! Launches every registered provider concurrently for one postal code and
//! returns the first address that comes back before the deadline.

mod coordinator;

pub use coordinator::{resolve, RaceCoordinator};
