//! Tradelane - cross-market arbitrage scanner for order book snapshots.
//!
//! Loads a snapshot of buy and sell orders spread across many locations,
//! pairs every cheap ask with a richer bid for the same item, and reports the
//! pairs that clear configurable margin, revenue and security thresholds.
//!
//! # Architecture
//!
//! - **`domain`** - Orders, the per-item order store, location security,
//!   opportunities and the best price query
//! - **`port`** - Lookup traits for item volumes and routes, plus the scan
//!   progress observer
//! - **`application`** - The scan pipeline: matcher, cargo normalizer and
//!   route enricher
//! - **`adapter`** - Snapshot loaders, the CSV report writer and the CLI
//!
//! # Modules
//!
//! - [`config`] - TOML configuration and logging setup
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use tradelane::adapter::outbound::snapshot::{load_locations, load_orders};
//! use tradelane::application::{ScanConfig, Scanner};
//! use tradelane::domain::RegionFilter;
//! use std::path::Path;
//!
//! fn main() -> tradelane::error::Result<()> {
//!     let locations = load_locations(Path::new("locations.json"))?;
//!     let orders = load_orders(Path::new("orders.csv"), RegionFilter::All)?;
//!     let config = ScanConfig::default();
//!     let report = Scanner::new(&config, &locations).run(&orders.store)?;
//!     println!("{} opportunities", report.opportunities.len());
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
