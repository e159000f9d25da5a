//! Route enrichment.
//!
//! Route length depends only on the (origin, destination) pair, so the
//! enricher collapses opportunities to distinct pairs, resolves each pair
//! once and fans the result back out.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::{LocationId, Opportunity, Route};
use crate::error::LookupError;
use crate::port::{RouteLookup, ScanObserver, Stage};

/// What to do with opportunities whose route could not be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteFailurePolicy {
    /// Drop the affected opportunities and report the failed pairs.
    #[default]
    Exclude,
    /// Fail the whole scan on the first failed pair.
    Abort,
}

impl std::fmt::Display for RouteFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exclude => f.write_str("exclude"),
            Self::Abort => f.write_str("abort"),
        }
    }
}

/// Route enrichment settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RouteConfig {
    /// Attach routes to surviving opportunities.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub failure: RouteFailurePolicy,

    /// JSON route table used by the CLI.
    #[serde(default)]
    pub table: Option<PathBuf>,
}

/// A pair whose route lookup failed.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteFailure {
    pub origin: LocationId,
    pub origin_name: String,
    pub destination: LocationId,
    pub destination_name: String,
    pub error: LookupError,
}

/// Enriched opportunities plus the pairs that failed.
#[derive(Debug, Clone, Default)]
pub struct RouteEnrichment {
    /// Every input opportunity; those on a failed pair carry no route.
    pub opportunities: Vec<Opportunity>,
    pub failures: Vec<RouteFailure>,
    /// Lookups issued (one per distinct pair).
    pub lookups: usize,
}

impl RouteEnrichment {
    /// Opportunities that received a route.
    pub fn routed(&self) -> impl Iterator<Item = &Opportunity> {
        self.opportunities.iter().filter(|o| o.route().is_some())
    }

    /// Drop opportunities on failed pairs.
    #[must_use]
    pub fn exclude_failed(mut self) -> Self {
        self.opportunities.retain(|o| o.route().is_some());
        self
    }
}

type Pair = (LocationId, LocationId);

/// Attach a route and hop count to every opportunity.
///
/// Issues at most one lookup per distinct (origin, destination) pair. A
/// failed lookup, or one that returns an empty route, is reported in
/// [`RouteEnrichment::failures`] and leaves the affected opportunities
/// without a route.
pub fn enrich(
    opportunities: &[Opportunity],
    lookup: &dyn RouteLookup,
    observer: &dyn ScanObserver,
) -> RouteEnrichment {
    let mut pairs: BTreeMap<Pair, (&str, &str)> = BTreeMap::new();
    for opportunity in opportunities {
        let origin = opportunity.origin();
        let destination = opportunity.destination();
        pairs
            .entry((origin.location_id.clone(), destination.location_id.clone()))
            .or_insert((&origin.location_name, &destination.location_name));
    }

    observer.stage_started(Stage::Routes, pairs.len());
    let mut routes: BTreeMap<Pair, Route> = BTreeMap::new();
    let mut failures = Vec::new();

    for ((origin, destination), (origin_name, destination_name)) in &pairs {
        let resolved = lookup
            .route(origin, destination)
            .and_then(|route| non_empty(route, origin, destination));
        match resolved {
            Ok(route) => {
                observer.advanced(Stage::Routes, 1);
                routes.insert((origin.clone(), destination.clone()), route);
            }
            Err(error) => {
                observer.advanced(Stage::Routes, 0);
                warn!(
                    origin = %origin_name,
                    destination = %destination_name,
                    error = %error,
                    "Route lookup failed"
                );
                failures.push(RouteFailure {
                    origin: origin.clone(),
                    origin_name: (*origin_name).to_string(),
                    destination: destination.clone(),
                    destination_name: (*destination_name).to_string(),
                    error,
                });
            }
        }
    }

    let enriched: Vec<Opportunity> = opportunities
        .iter()
        .map(|opportunity| {
            let key = (
                opportunity.origin().location_id.clone(),
                opportunity.destination().location_id.clone(),
            );
            match routes.get(&key) {
                Some(route) => opportunity.with_route(route.clone()),
                None => opportunity.clone(),
            }
        })
        .collect();

    observer.stage_finished(Stage::Routes, routes.len());
    info!(
        pairs = pairs.len(),
        resolved = routes.len(),
        failed = failures.len(),
        "Routes attached"
    );

    RouteEnrichment {
        opportunities: enriched,
        failures,
        lookups: pairs.len(),
    }
}

fn non_empty(
    route: Route,
    origin: &LocationId,
    destination: &LocationId,
) -> Result<Route, LookupError> {
    if route.is_empty() {
        return Err(LookupError::NoRoute {
            origin: origin.clone(),
            destination: destination.clone(),
        });
    }
    Ok(route)
}
