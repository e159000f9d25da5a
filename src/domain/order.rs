//! Standing orders.
//!
//! An [`Order`] is immutable once constructed; validation happens in
//! [`Order::try_new`] so everything downstream can rely on a positive price
//! and a non-empty item identity.

use std::fmt;
use std::str::FromStr;

use super::error::DomainError;
use super::id::{ItemId, LocationId, RegionId};
use super::money::{Price, Quantity};

/// Which side of the book an order sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Sell order: someone offers units at this price.
    Ask,
    /// Buy order: someone will pay this price for units.
    Bid,
}

impl Side {
    /// Side from the snapshot's `is_buy_order` flag.
    pub const fn from_is_buy(is_buy_order: bool) -> Self {
        if is_buy_order {
            Self::Bid
        } else {
            Self::Ask
        }
    }

    /// Whether this is a buy order.
    pub const fn is_bid(self) -> bool {
        matches!(self, Self::Bid)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ask => write!(f, "ask"),
            Self::Bid => write!(f, "bid"),
        }
    }
}

impl FromStr for Side {
    type Err = DomainError;

    /// Accepts the side names (`ask`/`sell`, `bid`/`buy`) as well as the
    /// boolean spellings used by the `is_buy_order` column.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bid" | "buy" | "true" | "t" | "yes" | "y" | "1" => Ok(Self::Bid),
            "ask" | "sell" | "false" | "f" | "no" | "n" | "0" => Ok(Self::Ask),
            _ => Err(DomainError::InvalidSide {
                value: s.to_string(),
            }),
        }
    }
}

/// Display name and identifier of an item type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Where an order sits: the location and its containing region.
///
/// `location_id` is the solar system used for security and routing;
/// `station_id` is the station the order was placed at, when known.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Place {
    pub location_id: LocationId,
    pub location_name: String,
    pub region_id: RegionId,
    pub region_name: String,
    pub station_id: Option<LocationId>,
}

impl Place {
    pub fn new(
        location_id: impl Into<LocationId>,
        location_name: impl Into<String>,
        region_id: impl Into<RegionId>,
        region_name: impl Into<String>,
    ) -> Self {
        Self {
            location_id: location_id.into(),
            location_name: location_name.into(),
            region_id: region_id.into(),
            region_name: region_name.into(),
            station_id: None,
        }
    }

    /// Attach the station the order was placed at.
    pub fn with_station(mut self, station_id: impl Into<LocationId>) -> Self {
        self.station_id = Some(station_id.into());
        self
    }

    /// The most specific identifier known: the station, else the system.
    pub fn site_id(&self) -> &LocationId {
        self.station_id.as_ref().unwrap_or(&self.location_id)
    }
}

/// One outstanding offer to buy or sell a quantity of one item at one place.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    item: Item,
    side: Side,
    price: Price,
    quantity_remaining: Quantity,
    min_quantity: Quantity,
    place: Place,
}

impl Order {
    /// Create a validated order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` when the price is not positive or the item
    /// identity is empty.
    pub fn try_new(
        item: Item,
        side: Side,
        price: Price,
        quantity_remaining: Quantity,
        min_quantity: Quantity,
        place: Place,
    ) -> Result<Self, DomainError> {
        if price <= Price::ZERO {
            return Err(DomainError::NonPositivePrice { price });
        }
        if item.id.as_str().is_empty() {
            return Err(DomainError::EmptyField { field: "item_id" });
        }
        if item.name.is_empty() {
            return Err(DomainError::EmptyField { field: "item_name" });
        }
        Ok(Self {
            item,
            side,
            price,
            quantity_remaining,
            min_quantity,
            place,
        })
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item.id
    }

    pub fn item_name(&self) -> &str {
        &self.item.name
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn quantity_remaining(&self) -> Quantity {
        self.quantity_remaining
    }

    /// Minimum number of units per transaction against this order.
    pub fn min_quantity(&self) -> Quantity {
        self.min_quantity
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn location_id(&self) -> &LocationId {
        &self.place.location_id
    }

    pub fn location_name(&self) -> &str {
        &self.place.location_name
    }

    pub fn region_name(&self) -> &str {
        &self.place.region_name
    }
}
