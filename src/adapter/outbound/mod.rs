//! Outbound adapters.

pub mod report;
pub mod snapshot;
