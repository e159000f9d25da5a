//! Command-line interface.

pub mod best_price;
pub mod check;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod output;
pub mod progress;
pub mod scan;
pub mod table;

pub use command::{Cli, Commands};
