//! End-to-end scan pipeline.
//!
//! Wires the stages together in a fixed order: region restriction, matching,
//! item volumes, cargo normalization and route enrichment. Each optional
//! stage runs only when its config section enables it.

use serde::Serialize;
use tracing::{info, warn};

use super::cargo::{attach_item_volumes, CargoConfig, CargoNormalizer};
use super::matcher::{missing_locations, MatchConfig, Matcher};
use super::route::{enrich, RouteConfig, RouteFailure, RouteFailurePolicy};
use crate::domain::{Opportunity, OrderStore, RegionFilter, SecurityTable};
use crate::error::{ConfigError, LookupError, Result};
use crate::port::{ItemVolumeLookup, NoopObserver, RouteLookup, ScanObserver};

/// Complete, validated pipeline settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanConfig {
    pub matching: MatchConfig,
    pub cargo: CargoConfig,
    pub routes: RouteConfig,
    /// Ignore orders outside the safe-region list.
    pub safe_regions: bool,
    /// Match items on the rayon pool.
    pub parallel: bool,
}

impl ScanConfig {
    /// # Errors
    ///
    /// Returns the first invalid threshold or cargo setting.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.matching.validate()?;
        self.cargo.validate()?;
        Ok(())
    }

    pub fn region_filter(&self) -> RegionFilter {
        RegionFilter::from_safe_regions(self.safe_regions)
    }
}

/// Counters collected during one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub orders: usize,
    pub items: usize,
    pub items_two_sided: usize,
    pub pairs_compared: usize,
    pub matched: usize,
    pub item_lookups: usize,
    pub without_volume: usize,
    pub after_cargo: usize,
    pub route_lookups: usize,
    pub route_failures: usize,
    pub reported: usize,
}

/// Everything a scan produced.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Final opportunities, in item order.
    pub opportunities: Vec<Opportunity>,
    pub route_failures: Vec<RouteFailure>,
    /// Location names with no security rating.
    pub missing_locations: Vec<String>,
    /// Items whose volume lookup failed.
    pub missing_items: Vec<(String, LookupError)>,
    pub stats: ScanStats,
}

impl ScanReport {
    /// Opportunities sorted by the revenue that matters for this scan:
    /// per-cargo revenue when present, otherwise total potential revenue.
    pub fn ranked(&self) -> Vec<&Opportunity> {
        let mut ranked: Vec<&Opportunity> = self.opportunities.iter().collect();
        ranked.sort_by(|a, b| ranking_revenue(b).cmp(&ranking_revenue(a)));
        ranked
    }
}

fn ranking_revenue(opportunity: &Opportunity) -> rust_decimal::Decimal {
    opportunity
        .revenue_per_cargo()
        .unwrap_or_else(|| opportunity.potential_revenue())
}

/// Runs the pipeline over an order store.
///
/// [`Scanner::run`] validates the config and checks that every enabled stage
/// has its lookup before matching anything. Item volumes are attached
/// whenever an item lookup is supplied, even with cargo mode off.
pub struct Scanner<'a> {
    config: &'a ScanConfig,
    locations: &'a SecurityTable,
    items: Option<&'a dyn ItemVolumeLookup>,
    routes: Option<&'a dyn RouteLookup>,
    observer: &'a dyn ScanObserver,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a ScanConfig, locations: &'a SecurityTable) -> Self {
        Self {
            config,
            locations,
            items: None,
            routes: None,
            observer: &NoopObserver,
        }
    }

    #[must_use]
    pub fn with_item_lookup(mut self, lookup: &'a dyn ItemVolumeLookup) -> Self {
        self.items = Some(lookup);
        self
    }

    #[must_use]
    pub fn with_route_lookup(mut self, lookup: &'a dyn RouteLookup) -> Self {
        self.routes = Some(lookup);
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: &'a dyn ScanObserver) -> Self {
        self.observer = observer;
        self
    }

    fn check(&self) -> std::result::Result<(), ConfigError> {
        self.config.validate()?;
        if self.config.cargo.enabled && self.items.is_none() {
            return Err(ConfigError::MissingField {
                field: "input.items",
            });
        }
        if self.config.routes.enabled && self.routes.is_none() {
            return Err(ConfigError::MissingField {
                field: "routes.table",
            });
        }
        Ok(())
    }

    /// Run every enabled stage over `store`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for invalid settings or a missing lookup, and
    /// the first `LookupError` when a route fails under the `abort` policy.
    pub fn run(&self, store: &OrderStore) -> Result<ScanReport> {
        self.check()?;

        let restricted;
        let store = if self.config.safe_regions {
            restricted = store.restricted(self.config.region_filter());
            info!(
                kept = restricted.order_count(),
                dropped = store.order_count() - restricted.order_count(),
                "Restricted orders to safe regions"
            );
            &restricted
        } else {
            store
        };

        let mut stats = ScanStats {
            orders: store.order_count(),
            items: store.len(),
            ..ScanStats::default()
        };
        let missing_locations = missing_locations(store, self.locations);

        let matcher = Matcher::new(&self.config.matching, self.locations);
        let matched = if self.config.parallel {
            matcher.run_parallel(store, self.observer)
        } else {
            matcher.run(store, self.observer)
        };
        stats.items_two_sided = matched.items_scanned;
        stats.pairs_compared = matched.pairs_compared;
        stats.matched = matched.opportunities.len();
        let mut opportunities = matched.opportunities;

        let mut missing_items = Vec::new();
        if let Some(lookup) = self.items {
            let attached = attach_item_volumes(&opportunities, lookup, self.observer);
            stats.item_lookups = attached.lookups;
            missing_items = attached.missing;
            opportunities = attached.opportunities;
        }

        if self.config.cargo.enabled {
            let normalizer = CargoNormalizer::new(
                self.config.cargo.capacity,
                self.config.matching.min_revenue,
            )?;
            let outcome = normalizer.normalize(&opportunities, self.observer);
            stats.without_volume = outcome.without_volume;
            opportunities = outcome.kept;
        }
        stats.after_cargo = opportunities.len();

        let mut route_failures = Vec::new();
        if let (true, Some(lookup)) = (self.config.routes.enabled, self.routes) {
            let mut enrichment = enrich(&opportunities, lookup, self.observer);
            stats.route_lookups = enrichment.lookups;
            stats.route_failures = enrichment.failures.len();

            if self.config.routes.failure == RouteFailurePolicy::Abort {
                if let Some(failure) = enrichment.failures.first() {
                    warn!(
                        origin = %failure.origin_name,
                        destination = %failure.destination_name,
                        "Aborting scan on route failure"
                    );
                    return Err(failure.error.clone().into());
                }
            }

            route_failures = std::mem::take(&mut enrichment.failures);
            opportunities = enrichment.exclude_failed().opportunities;
        }

        stats.reported = opportunities.len();
        info!(
            orders = stats.orders,
            matched = stats.matched,
            reported = stats.reported,
            "Scan complete"
        );

        Ok(ScanReport {
            opportunities,
            route_failures,
            missing_locations,
            missing_items,
            stats,
        })
    }
}
