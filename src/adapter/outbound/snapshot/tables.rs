//! JSON metadata tables: location security, item volume and routes.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::info;

use crate::domain::id::RawId;
use crate::domain::{LocationId, Route, SecurityTable, Volume};
use crate::error::{LookupError, SnapshotError};
use crate::port::{ItemVolumeLookup, RouteLookup};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SnapshotError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SnapshotError::Json {
        path: display,
        source,
    })
}

#[derive(Debug, Deserialize)]
struct LocationEntry {
    security_status: Decimal,
}

/// Parse a location table: `{ "<name>": { "security_status": 0.9 } }`.
///
/// # Errors
///
/// Returns `serde_json::Error` for malformed input.
pub fn parse_locations(json: &str) -> Result<SecurityTable, serde_json::Error> {
    let entries: HashMap<String, LocationEntry> = serde_json::from_str(json)?;
    Ok(security_table(entries))
}

fn security_table(entries: HashMap<String, LocationEntry>) -> SecurityTable {
    entries
        .into_iter()
        .map(|(name, entry)| (name, entry.security_status))
        .collect()
}

/// Load the location security table from disk.
///
/// # Errors
///
/// Returns `SnapshotError` if the file is unreadable or malformed.
pub fn load_locations(path: &Path) -> Result<SecurityTable, SnapshotError> {
    let table = security_table(read_json(path)?);
    info!(path = %path.display(), locations = table.len(), "Loaded location table");
    Ok(table)
}

#[derive(Debug, Deserialize)]
struct ItemEntry {
    packaged_volume: Volume,
}

/// Packaged item volumes keyed by item name.
#[derive(Debug, Clone, Default)]
pub struct ItemTable {
    volumes: HashMap<String, Volume>,
}

impl ItemTable {
    /// Parse `{ "<name>": { "packaged_volume": 5.0 } }`.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` for malformed input.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, ItemEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// # Errors
    ///
    /// Returns `SnapshotError` if the file is unreadable or malformed.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let table = Self::from_entries(read_json(path)?);
        info!(path = %path.display(), items = table.len(), "Loaded item table");
        Ok(table)
    }

    fn from_entries(entries: HashMap<String, ItemEntry>) -> Self {
        Self {
            volumes: entries
                .into_iter()
                .map(|(name, entry)| (name, entry.packaged_volume))
                .collect(),
        }
    }

    pub fn insert(&mut self, item_name: impl Into<String>, volume: Volume) {
        self.volumes.insert(item_name.into(), volume);
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}

impl ItemVolumeLookup for ItemTable {
    fn packaged_volume(&self, item_name: &str) -> Result<Volume, LookupError> {
        self.volumes
            .get(item_name)
            .copied()
            .ok_or_else(|| LookupError::ItemNotFound {
                item: item_name.to_string(),
            })
    }
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    origin: RawId,
    destination: RawId,
    route: Vec<RawId>,
}

/// Precomputed routes keyed by (origin, destination).
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<(LocationId, LocationId), Route>,
}

impl RouteTable {
    /// Parse `[{ "origin": 1, "destination": 2, "route": [1, 5, 2] }]`.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` for malformed input.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<RouteEntry> = serde_json::from_str(json)?;
        Ok(Self::from_entries(entries))
    }

    /// # Errors
    ///
    /// Returns `SnapshotError` if the file is unreadable or malformed.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let table = Self::from_entries(read_json(path)?);
        info!(path = %path.display(), routes = table.len(), "Loaded route table");
        Ok(table)
    }

    fn from_entries(entries: Vec<RouteEntry>) -> Self {
        let routes = entries
            .into_iter()
            .map(|entry| {
                let key = (entry.origin.into(), entry.destination.into());
                let route: Route = entry.route.into_iter().map(LocationId::from).collect();
                (key, route)
            })
            .collect();
        Self { routes }
    }

    pub fn insert(&mut self, origin: LocationId, destination: LocationId, route: Route) {
        self.routes.insert((origin, destination), route);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteLookup for RouteTable {
    fn route(&self, origin: &LocationId, destination: &LocationId) -> Result<Route, LookupError> {
        self.routes
            .get(&(origin.clone(), destination.clone()))
            .cloned()
            .ok_or_else(|| LookupError::NoRoute {
                origin: origin.clone(),
                destination: destination.clone(),
            })
    }
}
