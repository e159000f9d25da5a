//! Lookup fakes that count how often they are asked.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::{LocationId, Route, Volume};
use crate::error::LookupError;
use crate::port::{ItemVolumeLookup, RouteLookup};

/// Returns a direct two-waypoint route for every pair except those whose
/// origin is marked unreachable.
#[derive(Debug, Default)]
pub struct DirectRoutes {
    calls: AtomicUsize,
    unreachable: HashSet<LocationId>,
}

impl DirectRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every lookup starting at `origin`.
    #[must_use]
    pub fn unreachable_from(mut self, origin: &str) -> Self {
        self.unreachable.insert(LocationId::new(origin));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteLookup for DirectRoutes {
    fn route(&self, origin: &LocationId, destination: &LocationId) -> Result<Route, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.contains(origin) {
            return Err(LookupError::NoRoute {
                origin: origin.clone(),
                destination: destination.clone(),
            });
        }
        Ok(Route::new(vec![origin.clone(), destination.clone()]))
    }
}

/// Fixed item volumes keyed by item name.
#[derive(Debug, Default)]
pub struct FixedVolumes {
    calls: AtomicUsize,
    volumes: HashMap<String, Volume>,
}

impl FixedVolumes {
    pub fn new(entries: &[(&str, Volume)]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            volumes: entries
                .iter()
                .map(|(name, volume)| ((*name).to_string(), *volume))
                .collect(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ItemVolumeLookup for FixedVolumes {
    fn packaged_volume(&self, item_name: &str) -> Result<Volume, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.volumes
            .get(item_name)
            .copied()
            .ok_or_else(|| LookupError::ItemNotFound {
                item: item_name.to_string(),
            })
    }
}
