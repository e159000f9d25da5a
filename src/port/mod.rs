//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams where the scan pipeline meets the outside world:
//! metadata and route sources it queries, and the observer it reports
//! progress to. Adapters in [`crate::adapter`] implement them over local
//! snapshot files; tests implement them with closures or counters.
//!
//! # Available Ports
//!
//! - [`ItemVolumeLookup`] - Per-item packaged volume
//! - [`RouteLookup`] - Waypoints between two locations
//! - [`ScanObserver`] - Progress events

mod lookup;
mod observer;

pub use lookup::{ItemVolumeLookup, RouteLookup};
pub use observer::{NoopObserver, ScanObserver, Stage};
