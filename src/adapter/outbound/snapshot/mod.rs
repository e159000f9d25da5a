//! Local snapshot files.
//!
//! The scanner never fetches market data. Everything it needs is read from
//! files produced ahead of time: the orders CSV and three JSON tables.

mod orders;
mod tables;

pub use orders::{load_orders, read_orders, OrderLoad, OrderRow, QUOTE};
pub use tables::{load_locations, parse_locations, ItemTable, RouteTable};
