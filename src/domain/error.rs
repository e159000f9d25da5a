//! Domain validation errors for core domain types.
//!
//! These errors are returned when an order or metadata record violates a
//! domain invariant at the ingestion boundary.
//!
//! # Examples
//!
//! ```
//! use tradelane::domain::error::DomainError;
//! use tradelane::domain::Side;
//!
//! let result: Result<Side, DomainError> = "maybe".parse();
//! assert!(matches!(result, Err(DomainError::InvalidSide { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// An order side value that is neither buy nor sell.
    #[error("invalid order side '{value}' (expected a buy/sell flag)")]
    InvalidSide {
        /// The raw value that failed to parse.
        value: String,
    },

    /// Order prices must be strictly positive.
    #[error("price must be positive, got {price}")]
    NonPositivePrice {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },

    /// Packaged volumes must be strictly positive.
    #[error("packaged volume must be positive, got {volume}")]
    NonPositiveVolume {
        /// The invalid volume that was provided.
        volume: rust_decimal::Decimal,
    },

    /// A required text field was empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Name of the empty field.
        field: &'static str,
    },
}
