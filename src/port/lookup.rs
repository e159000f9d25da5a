//! Metadata and route lookup ports.
//!
//! Both lookups are assumed to be expensive (remote calls in a real
//! deployment), so the pipeline only asks for what survived matching and
//! never asks twice for the same key within one run.

use crate::domain::{LocationId, Route, Volume};
use crate::error::LookupError;

/// Resolves the packaged transport volume of an item.
///
/// Closures `Fn(&str) -> Result<Volume, LookupError>` implement this trait.
pub trait ItemVolumeLookup {
    /// Packaged volume of one unit of `item_name`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::ItemNotFound` when the item is unknown, or
    /// another `LookupError` when the source fails.
    fn packaged_volume(&self, item_name: &str) -> Result<Volume, LookupError>;
}

impl<F> ItemVolumeLookup for F
where
    F: Fn(&str) -> Result<Volume, LookupError>,
{
    fn packaged_volume(&self, item_name: &str) -> Result<Volume, LookupError> {
        self(item_name)
    }
}

/// Resolves the travel route between two locations.
///
/// Closures `Fn(&LocationId, &LocationId) -> Result<Route, LookupError>`
/// implement this trait.
pub trait RouteLookup {
    /// Ordered waypoints from `origin` to `destination`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::NoRoute` when no route exists, or another
    /// `LookupError` when the source fails.
    fn route(&self, origin: &LocationId, destination: &LocationId) -> Result<Route, LookupError>;
}

impl<F> RouteLookup for F
where
    F: Fn(&LocationId, &LocationId) -> Result<Route, LookupError>,
{
    fn route(&self, origin: &LocationId, destination: &LocationId) -> Result<Route, LookupError> {
        self(origin, destination)
    }
}
