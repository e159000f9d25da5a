use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::LocationId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures reported by item-metadata and route lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("no metadata for item '{item}'")]
    ItemNotFound { item: String },

    #[error("unusable metadata for item '{item}': {source}")]
    InvalidItem {
        item: String,
        #[source]
        source: DomainError,
    },

    #[error("no route from {origin} to {destination}")]
    NoRoute {
        origin: LocationId,
        destination: LocationId,
    },

    #[error("route lookup failed: {0}")]
    Failed(String),
}

/// Snapshot file errors.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid order on line {line} of {path}: {source}")]
    InvalidOrder {
        path: String,
        line: u64,
        #[source]
        source: DomainError,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
