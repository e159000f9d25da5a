//! Location safety: security ratings and the safe-region list.

use std::collections::HashMap;

use super::money::Security;
use super::order::Order;

/// Regions considered safe for hauling when region restriction is enabled.
pub const SAFE_REGIONS: &[&str] = &[
    "The Forge",
    "Lonetrek",
    "Black Rise",
    "The Citadel",
    "Placid",
    "Essence",
    "Verge Vendor",
    "Solitude",
    "Everyshore",
    "Sinq Laison",
    "Aridia",
    "Kor-Azor",
    "Khanid",
    "Tash-Murkon",
    "Domain",
    "Devoid",
    "The Bleak Lands",
    "Derelik",
    "Heimatar",
    "Molden Heath",
    "Metropolis",
];

/// Whether a region is on the fixed safe-region list.
pub fn is_safe_region(region_name: &str) -> bool {
    SAFE_REGIONS.contains(&region_name)
}

/// Security ratings keyed by location name.
#[derive(Debug, Clone, Default)]
pub struct SecurityTable {
    ratings: HashMap<String, Security>,
}

impl SecurityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rating for a location, replacing any previous one.
    pub fn insert(&mut self, location_name: impl Into<String>, rating: Security) {
        self.ratings.insert(location_name.into(), rating);
    }

    /// Rating for a location, if known.
    pub fn rating(&self, location_name: &str) -> Option<Security> {
        self.ratings.get(location_name).copied()
    }

    pub fn contains(&self, location_name: &str) -> bool {
        self.ratings.contains_key(location_name)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Security)> for SecurityTable {
    fn from_iter<I: IntoIterator<Item = (S, Security)>>(iter: I) -> Self {
        Self {
            ratings: iter
                .into_iter()
                .map(|(name, rating)| (name.into(), rating))
                .collect(),
        }
    }
}

/// True iff the location's rating is at least `min_security`.
///
/// A location with no rating never qualifies.
pub fn qualifies(table: &SecurityTable, location_name: &str, min_security: Security) -> bool {
    table
        .rating(location_name)
        .is_some_and(|rating| rating >= min_security)
}

/// Security predicate bound to a table and threshold.
#[derive(Debug, Clone, Copy)]
pub struct LocationQualifier<'a> {
    table: &'a SecurityTable,
    min_security: Security,
}

impl<'a> LocationQualifier<'a> {
    pub fn new(table: &'a SecurityTable, min_security: Security) -> Self {
        Self {
            table,
            min_security,
        }
    }

    pub fn qualifies(&self, location_name: &str) -> bool {
        qualifies(self.table, location_name, self.min_security)
    }

    pub fn rating(&self, location_name: &str) -> Option<Security> {
        self.table.rating(location_name)
    }

    pub fn min_security(&self) -> Security {
        self.min_security
    }
}

/// Which regions an order may come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegionFilter {
    /// Every region.
    #[default]
    All,
    /// Only regions on [`SAFE_REGIONS`].
    SafeOnly,
}

impl RegionFilter {
    pub const fn from_safe_regions(safe_regions: bool) -> Self {
        if safe_regions {
            Self::SafeOnly
        } else {
            Self::All
        }
    }

    pub fn admits_region(self, region_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::SafeOnly => is_safe_region(region_name),
        }
    }

    pub fn admits(self, order: &Order) -> bool {
        self.admits_region(order.region_name())
    }
}
