//! Cargo normalization.
//!
//! An opportunity can carry a huge total revenue and still be useless if a
//! single hauling run only fits a handful of units. This stage re-prices each
//! opportunity by what one cargo load of the item can earn.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::error::DomainError;
use crate::domain::{Opportunity, Price, Volume};
use crate::error::{ConfigError, LookupError};
use crate::port::{ItemVolumeLookup, ScanObserver, Stage};

/// Single-cargo mode settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CargoConfig {
    /// Re-rank opportunities by per-cargo revenue.
    #[serde(default)]
    pub enabled: bool,

    /// Capacity of one cargo load (m3). Required when enabled.
    #[serde(default)]
    pub capacity: Volume,
}

impl CargoConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the mode is enabled without a
    /// positive capacity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.capacity <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "cargo_capacity",
                reason: format!(
                    "must be greater than 0 when single cargo mode is enabled, got {}",
                    self.capacity
                ),
            });
        }
        Ok(())
    }
}

/// Opportunities with volumes attached, plus the items that had none.
#[derive(Debug, Clone, Default)]
pub struct VolumeAttachment {
    pub opportunities: Vec<Opportunity>,
    /// Items whose lookup failed, with the reason.
    pub missing: Vec<(String, LookupError)>,
    /// Distinct items queried.
    pub lookups: usize,
}

/// Attach the packaged volume of each opportunity's item.
///
/// The lookup is queried once per distinct item name. Opportunities whose
/// item could not be resolved are returned unchanged (without a volume) and
/// the item is reported in [`VolumeAttachment::missing`].
pub fn attach_item_volumes(
    opportunities: &[Opportunity],
    lookup: &dyn ItemVolumeLookup,
    observer: &dyn ScanObserver,
) -> VolumeAttachment {
    let items: BTreeSet<&str> = opportunities
        .iter()
        .map(|opportunity| opportunity.item().name.as_str())
        .collect();

    observer.stage_started(Stage::ItemVolumes, items.len());
    let volumes: BTreeMap<&str, Result<Volume, LookupError>> = items
        .into_iter()
        .map(|name| {
            let result = resolve_volume(lookup, name);
            observer.advanced(Stage::ItemVolumes, usize::from(result.is_ok()));
            (name, result)
        })
        .collect();

    let mut missing = Vec::new();
    for (name, result) in &volumes {
        if let Err(e) = result {
            warn!(item = %name, error = %e, "Item volume unavailable");
            missing.push(((*name).to_string(), e.clone()));
        }
    }

    let attached: Vec<Opportunity> = opportunities
        .iter()
        .map(|opportunity| match volumes.get(opportunity.item().name.as_str()) {
            Some(Ok(volume)) => opportunity.with_item_volume(*volume),
            _ => opportunity.clone(),
        })
        .collect();

    observer.stage_finished(Stage::ItemVolumes, attached.len());
    VolumeAttachment {
        opportunities: attached,
        missing,
        lookups: volumes.len(),
    }
}

fn resolve_volume(lookup: &dyn ItemVolumeLookup, item: &str) -> Result<Volume, LookupError> {
    let volume = lookup.packaged_volume(item)?;
    if volume <= Decimal::ZERO {
        return Err(LookupError::InvalidItem {
            item: item.to_string(),
            source: DomainError::NonPositiveVolume { volume },
        });
    }
    Ok(volume)
}

/// Profit achievable within one cargo load of `capacity`.
///
/// `floor(capacity / volume)` units fit per trip; the result never exceeds
/// the opportunity's total potential revenue. Returns `None` when the
/// opportunity has no volume attached. A per-trip figure too large for a
/// `Decimal` is capped at the potential revenue.
pub fn revenue_per_cargo(opportunity: &Opportunity, capacity: Volume) -> Option<Price> {
    let volume = opportunity.item_volume()?;
    let potential = opportunity.potential_revenue();
    let per_trip = capacity
        .checked_div(volume)
        .and_then(|units| opportunity.unit_profit().checked_mul(units.floor()));
    Some(per_trip.map_or(potential, |p| p.min(potential)))
}

/// Outcome of cargo normalization.
#[derive(Debug, Clone, Default)]
pub struct CargoOutcome {
    /// Opportunities with per-cargo revenue above the floor.
    pub kept: Vec<Opportunity>,
    /// Opportunities dropped because their item had no volume.
    pub without_volume: usize,
}

/// Re-prices opportunities per cargo load and applies the revenue floor.
#[derive(Debug, Clone, Copy)]
pub struct CargoNormalizer {
    capacity: Volume,
    min_revenue: Price,
}

impl CargoNormalizer {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a non-positive capacity.
    pub fn new(capacity: Volume, min_revenue: Price) -> Result<Self, ConfigError> {
        CargoConfig {
            enabled: true,
            capacity,
        }
        .validate()?;
        Ok(Self {
            capacity,
            min_revenue,
        })
    }

    pub fn capacity(&self) -> Volume {
        self.capacity
    }

    /// Attach per-cargo revenue and keep opportunities strictly above the
    /// revenue floor.
    ///
    /// Opportunities without an item volume cannot be normalized and are
    /// dropped.
    pub fn normalize(
        &self,
        opportunities: &[Opportunity],
        observer: &dyn ScanObserver,
    ) -> CargoOutcome {
        observer.stage_started(Stage::Cargo, opportunities.len());
        let mut outcome = CargoOutcome::default();

        for opportunity in opportunities {
            let Some(per_trip) = revenue_per_cargo(opportunity, self.capacity) else {
                outcome.without_volume += 1;
                observer.advanced(Stage::Cargo, 0);
                continue;
            };
            let keep = per_trip > self.min_revenue;
            if keep {
                outcome.kept.push(opportunity.with_revenue_per_cargo(per_trip));
            }
            observer.advanced(Stage::Cargo, usize::from(keep));
        }

        observer.stage_finished(Stage::Cargo, outcome.kept.len());
        info!(
            capacity = %self.capacity,
            min_revenue = %self.min_revenue,
            kept = outcome.kept.len(),
            without_volume = outcome.without_volume,
            "Filtered to single-cargo opportunities"
        );
        outcome
    }
}

/// Attach volumes from `lookup`, then normalize per cargo load.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a non-positive capacity, before
/// any lookup is made.
pub fn normalize(
    opportunities: &[Opportunity],
    lookup: &dyn ItemVolumeLookup,
    capacity: Volume,
    min_revenue: Price,
) -> Result<Vec<Opportunity>, ConfigError> {
    let normalizer = CargoNormalizer::new(capacity, min_revenue)?;
    let noop = crate::port::NoopObserver;
    let attached = attach_item_volumes(opportunities, lookup, &noop);
    Ok(normalizer.normalize(&attached.opportunities, &noop).kept)
}
