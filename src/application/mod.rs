//! Application services (use cases).
//!
//! These services run the scan stages over domain types and talk to the
//! outside world only through the traits in [`crate::port`].

pub mod cargo;
pub mod matcher;
pub mod route;
pub mod scan;

pub use cargo::{
    attach_item_volumes, normalize, revenue_per_cargo, CargoConfig, CargoNormalizer,
    CargoOutcome, VolumeAttachment,
};
pub use matcher::{match_opportunities, missing_locations, MatchConfig, MatchOutcome, Matcher};
pub use route::{enrich, RouteConfig, RouteEnrichment, RouteFailure, RouteFailurePolicy};
pub use scan::{ScanConfig, ScanReport, ScanStats, Scanner};
