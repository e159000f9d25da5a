//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for orders, places and security tables.
//! - [`lookup`] - Counting [`RouteLookup`](crate::port::RouteLookup) and
//!   [`ItemVolumeLookup`](crate::port::ItemVolumeLookup) fakes.
//! - [`snapshot`] - Writers for orders CSV and JSON tables on disk.

pub mod domain;
pub mod lookup;
pub mod snapshot;
