//! Hexagonal adapters: snapshot files and the report on the outbound side,
//! the command-line interface on the inbound side.

pub mod inbound;
pub mod outbound;
