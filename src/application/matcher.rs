//! Opportunity matching.
//!
//! For every item, cross-matches each qualifying sell order against each
//! qualifying buy order and emits an [`Opportunity`] for every pair that
//! clears the margin and revenue thresholds. The cross product is per item:
//! orders of different items are never compared.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::domain::{
    margin_percent, revenue, ItemBook, LocationQualifier, Opportunity, Order, OrderStore, Price,
    Security, SecurityTable,
};
use crate::error::ConfigError;
use crate::port::{ScanObserver, Stage};

/// Thresholds applied while matching.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchConfig {
    /// Minimum margin in percent (inclusive).
    #[serde(default = "default_min_margin")]
    pub min_margin: Decimal,

    /// Sell orders priced above this are never bought from.
    #[serde(default = "default_max_buy_price", rename = "max_item_purchase_price")]
    pub max_buy_price: Price,

    /// Minimum potential revenue of a pair (inclusive).
    #[serde(default = "default_min_revenue", rename = "min_potential_revenue")]
    pub min_revenue: Price,

    /// Minimum security rating of both locations (inclusive).
    #[serde(default = "default_min_security", rename = "min_system_security")]
    pub min_security: Security,
}

fn default_min_margin() -> Decimal {
    Decimal::new(30, 0)
}

fn default_max_buy_price() -> Price {
    Decimal::new(1_000_000, 0)
}

fn default_min_revenue() -> Price {
    Decimal::new(5_000_000, 0)
}

fn default_min_security() -> Security {
    Decimal::new(5, 1) // 0.5
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_margin: default_min_margin(),
            max_buy_price: default_max_buy_price(),
            min_revenue: default_min_revenue(),
            min_security: default_min_security(),
        }
    }
}

impl MatchConfig {
    /// Reject thresholds that can never match anything sensible.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a non-positive purchase cap
    /// or any negative threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_margin < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "min_margin",
                reason: format!("must not be negative, got {}", self.min_margin),
            });
        }
        if self.max_buy_price <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "max_item_purchase_price",
                reason: format!("must be positive, got {}", self.max_buy_price),
            });
        }
        if self.min_revenue < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "min_potential_revenue",
                reason: format!("must not be negative, got {}", self.min_revenue),
            });
        }
        if self.min_security < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "min_system_security",
                reason: format!("must not be negative, got {}", self.min_security),
            });
        }
        Ok(())
    }
}

/// Result of matching a whole store.
#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    pub opportunities: Vec<Opportunity>,
    /// Items with orders on both sides.
    pub items_scanned: usize,
    /// Qualifying (ask, bid) pairs whose prices were compared.
    pub pairs_compared: usize,
}

#[derive(Debug, Default)]
struct ItemMatch {
    opportunities: Vec<Opportunity>,
    pairs_compared: usize,
}

/// Matches asks against bids item by item.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    config: &'a MatchConfig,
    qualifier: LocationQualifier<'a>,
}

impl<'a> Matcher<'a> {
    pub fn new(config: &'a MatchConfig, locations: &'a SecurityTable) -> Self {
        Self {
            config,
            qualifier: LocationQualifier::new(locations, config.min_security),
        }
    }

    /// Match every item sequentially.
    pub fn run(&self, store: &OrderStore, observer: &dyn ScanObserver) -> MatchOutcome {
        observer.stage_started(Stage::Matching, store.len());
        let results = store
            .books()
            .map(|book| self.observe_item(book, observer))
            .collect();
        self.finish(results, observer)
    }

    /// Match items on the rayon thread pool.
    ///
    /// Produces the same set of opportunities as [`Matcher::run`]; the
    /// per-item lists are merged in item order afterwards.
    pub fn run_parallel(&self, store: &OrderStore, observer: &dyn ScanObserver) -> MatchOutcome {
        observer.stage_started(Stage::Matching, store.len());
        let results = store
            .book_refs()
            .par_iter()
            .map(|book| self.observe_item(book, observer))
            .collect();
        self.finish(results, observer)
    }

    fn observe_item(&self, book: &ItemBook, observer: &dyn ScanObserver) -> Option<ItemMatch> {
        let result = self.match_book(book);
        observer.advanced(
            Stage::Matching,
            result.as_ref().map_or(0, |m| m.opportunities.len()),
        );
        result
    }

    fn finish(&self, results: Vec<Option<ItemMatch>>, observer: &dyn ScanObserver) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();
        for item in results.into_iter().flatten() {
            outcome.items_scanned += 1;
            outcome.pairs_compared += item.pairs_compared;
            outcome.opportunities.extend(item.opportunities);
        }
        observer.stage_finished(Stage::Matching, outcome.opportunities.len());
        info!(
            items = outcome.items_scanned,
            pairs = outcome.pairs_compared,
            opportunities = outcome.opportunities.len(),
            "Matching complete"
        );
        outcome
    }

    /// Opportunities for a single item.
    pub fn match_item(&self, book: &ItemBook) -> Vec<Opportunity> {
        self.match_book(book)
            .map(|m| m.opportunities)
            .unwrap_or_default()
    }

    fn match_book(&self, book: &ItemBook) -> Option<ItemMatch> {
        if !book.is_two_sided() {
            return None;
        }

        let asks: Vec<&Order> = book
            .asks()
            .iter()
            .filter(|ask| ask.price() <= self.config.max_buy_price)
            .filter(|ask| self.qualifier.qualifies(ask.location_name()))
            .collect();

        let mut result = ItemMatch::default();
        for bid in book.bids() {
            if !self.qualifier.qualifies(bid.location_name()) {
                continue;
            }
            for ask in &asks {
                result.pairs_compared += 1;
                if let Some(opportunity) = self.evaluate(ask, bid) {
                    result.opportunities.push(opportunity);
                }
            }
        }

        debug!(
            item = %book.item().name,
            asks = book.asks().len(),
            bids = book.bids().len(),
            found = result.opportunities.len(),
            "Matched item"
        );
        Some(result)
    }

    fn evaluate(&self, ask: &Order, bid: &Order) -> Option<Opportunity> {
        if ask.price() >= bid.price() {
            return None;
        }

        let quantity = ask.quantity_remaining().min(bid.quantity_remaining());
        let (Some(margin), Some(potential)) = (
            margin_percent(ask.price(), bid.price()),
            revenue(quantity, ask.price(), bid.price()),
        ) else {
            warn!(
                item = %ask.item_name(),
                ask = %ask.price(),
                bid = %bid.price(),
                "Skipping pair with out-of-range margin or revenue"
            );
            return None;
        };

        if margin < self.config.min_margin || potential < self.config.min_revenue {
            return None;
        }

        let built = Opportunity::builder()
            .ask(ask)
            .bid(bid)
            .security(
                self.qualifier.rating(ask.location_name()),
                self.qualifier.rating(bid.location_name()),
            )
            .build();

        match built {
            Ok(opportunity) => Some(opportunity),
            Err(e) => {
                warn!(item = %ask.item_name(), error = %e, "Skipping malformed pair");
                None
            }
        }
    }
}

/// Match a store against the given thresholds.
pub fn match_opportunities(
    store: &OrderStore,
    locations: &SecurityTable,
    min_margin: Decimal,
    max_buy_price: Price,
    min_revenue: Price,
    min_security: Security,
) -> Vec<Opportunity> {
    let config = MatchConfig {
        min_margin,
        max_buy_price,
        min_revenue,
        min_security,
    };
    Matcher::new(&config, locations)
        .run(store, &crate::port::NoopObserver)
        .opportunities
}

/// Location names referenced by the store that have no security rating.
///
/// Each is logged once at warn level; orders there never qualify.
pub fn missing_locations(store: &OrderStore, locations: &SecurityTable) -> Vec<String> {
    let missing: Vec<String> = store
        .location_names()
        .into_iter()
        .filter(|name| !locations.contains(name))
        .map(ToOwned::to_owned)
        .collect();

    for name in &missing {
        warn!(location = %name, "No security rating; treating location as unsafe");
    }
    missing
}
