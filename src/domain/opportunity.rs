//! Opportunity type with builder pattern.
//!
//! This module provides the `Opportunity` struct representing one matched
//! (sell order, buy order) pair, along with `OpportunityBuilder` for safe
//! construction. Later pipeline stages never mutate an opportunity; they
//! return a new one with the extra field filled in.

use rust_decimal::Decimal;
use std::fmt;

use super::money::{margin_percent, revenue, Price, Quantity, Security, Volume};
use super::order::{Item, Order, Place, Side};
use super::route::Route;

/// Error returned when building an Opportunity fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpportunityBuildError {
    /// The sell order (buy-in side) is required but was not provided.
    MissingAsk,
    /// The buy order (sell-in side) is required but was not provided.
    MissingBid,
    /// An order was given for the wrong side of the book.
    WrongSide,
    /// The two orders are for different items.
    ItemMismatch,
    /// Margin or potential revenue does not fit in a `Decimal`.
    Overflow,
}

impl fmt::Display for OpportunityBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAsk => write!(f, "ask order is required"),
            Self::MissingBid => write!(f, "bid order is required"),
            Self::WrongSide => write!(f, "ask must be a sell order and bid a buy order"),
            Self::ItemMismatch => write!(f, "ask and bid must be for the same item"),
            Self::Overflow => write!(f, "margin or revenue is out of range"),
        }
    }
}

impl std::error::Error for OpportunityBuildError {}

/// A detected arbitrage opportunity: buy at the ask's location, sell at the
/// bid's location.
///
/// Use `Opportunity::builder()` to construct instances.
/// The builder calculates derived fields (margin, quantity, potential
/// revenue) automatically.
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    item: Item,
    origin: Place,
    destination: Place,
    buy_price: Price,
    sell_price: Price,
    buy_min_quantity: Quantity,
    sell_min_quantity: Quantity,
    available_to_buy: Quantity,
    able_to_sell: Quantity,
    margin: Decimal,
    quantity: Quantity,
    potential_revenue: Price,
    origin_security: Option<Security>,
    destination_security: Option<Security>,
    item_volume: Option<Volume>,
    revenue_per_cargo: Option<Price>,
    route: Option<Route>,
}

impl Opportunity {
    /// Create a new builder for constructing an Opportunity.
    pub fn builder<'a>() -> OpportunityBuilder<'a> {
        OpportunityBuilder::new()
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Where the item is bought (the ask's place).
    pub fn origin(&self) -> &Place {
        &self.origin
    }

    /// Where the item is sold (the bid's place).
    pub fn destination(&self) -> &Place {
        &self.destination
    }

    /// Price paid per unit (the ask price).
    pub fn buy_price(&self) -> Price {
        self.buy_price
    }

    /// Price received per unit (the bid price).
    pub fn sell_price(&self) -> Price {
        self.sell_price
    }

    pub fn buy_min_quantity(&self) -> Quantity {
        self.buy_min_quantity
    }

    pub fn sell_min_quantity(&self) -> Quantity {
        self.sell_min_quantity
    }

    /// Units remaining on the ask.
    pub fn available_to_buy(&self) -> Quantity {
        self.available_to_buy
    }

    /// Units remaining on the bid.
    pub fn able_to_sell(&self) -> Quantity {
        self.able_to_sell
    }

    /// Margin in percent: `(sell / buy - 1) * 100`.
    pub fn margin(&self) -> Decimal {
        self.margin
    }

    /// Units that can move through both orders.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Profit across the full transactable quantity.
    pub fn potential_revenue(&self) -> Price {
        self.potential_revenue
    }

    /// Profit per unit moved.
    pub fn unit_profit(&self) -> Price {
        self.sell_price - self.buy_price
    }

    pub fn origin_security(&self) -> Option<Security> {
        self.origin_security
    }

    pub fn destination_security(&self) -> Option<Security> {
        self.destination_security
    }

    /// Packaged volume of one unit, once attached.
    pub fn item_volume(&self) -> Option<Volume> {
        self.item_volume
    }

    /// Profit achievable within one cargo load, once normalized.
    pub fn revenue_per_cargo(&self) -> Option<Price> {
        self.revenue_per_cargo
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Number of waypoints on the attached route.
    pub fn hop_count(&self) -> Option<usize> {
        self.route.as_ref().map(Route::hop_count)
    }

    /// Copy of this opportunity with the per-unit volume attached.
    #[must_use]
    pub fn with_item_volume(&self, volume: Volume) -> Self {
        Self {
            item_volume: Some(volume),
            ..self.clone()
        }
    }

    /// Copy of this opportunity with the per-cargo revenue attached.
    #[must_use]
    pub fn with_revenue_per_cargo(&self, revenue: Price) -> Self {
        Self {
            revenue_per_cargo: Some(revenue),
            ..self.clone()
        }
    }

    /// Copy of this opportunity with a resolved route attached.
    #[must_use]
    pub fn with_route(&self, route: Route) -> Self {
        Self {
            route: Some(route),
            ..self.clone()
        }
    }
}

/// Builder for constructing `Opportunity` instances.
///
/// # Example
///
/// ```ignore
/// let opportunity = Opportunity::builder()
///     .ask(&sell_order)
///     .bid(&buy_order)
///     .security(Some(origin_rating), Some(destination_rating))
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct OpportunityBuilder<'a> {
    ask: Option<&'a Order>,
    bid: Option<&'a Order>,
    origin_security: Option<Security>,
    destination_security: Option<Security>,
}

impl<'a> OpportunityBuilder<'a> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sell order the item is bought from.
    pub fn ask(mut self, order: &'a Order) -> Self {
        self.ask = Some(order);
        self
    }

    /// Set the buy order the item is sold into.
    pub fn bid(mut self, order: &'a Order) -> Self {
        self.bid = Some(order);
        self
    }

    /// Set the security ratings of the origin and destination.
    pub fn security(mut self, origin: Option<Security>, destination: Option<Security>) -> Self {
        self.origin_security = origin;
        self.destination_security = destination;
        self
    }

    /// Build the Opportunity, calculating derived fields.
    ///
    /// # Errors
    ///
    /// Returns `OpportunityBuildError` if an order is missing, on the wrong
    /// side, the two orders are for different items, or the margin or
    /// revenue overflows.
    pub fn build(self) -> Result<Opportunity, OpportunityBuildError> {
        let ask = self.ask.ok_or(OpportunityBuildError::MissingAsk)?;
        let bid = self.bid.ok_or(OpportunityBuildError::MissingBid)?;

        if ask.side() != Side::Ask || bid.side() != Side::Bid {
            return Err(OpportunityBuildError::WrongSide);
        }
        if ask.item_id() != bid.item_id() {
            return Err(OpportunityBuildError::ItemMismatch);
        }

        let buy_price = ask.price();
        let sell_price = bid.price();
        let quantity = ask.quantity_remaining().min(bid.quantity_remaining());
        let margin =
            margin_percent(buy_price, sell_price).ok_or(OpportunityBuildError::Overflow)?;
        let potential_revenue =
            revenue(quantity, buy_price, sell_price).ok_or(OpportunityBuildError::Overflow)?;

        Ok(Opportunity {
            item: ask.item().clone(),
            origin: ask.place().clone(),
            destination: bid.place().clone(),
            buy_price,
            sell_price,
            buy_min_quantity: ask.min_quantity(),
            sell_min_quantity: bid.min_quantity(),
            available_to_buy: ask.quantity_remaining(),
            able_to_sell: bid.quantity_remaining(),
            margin,
            quantity,
            potential_revenue,
            origin_security: self.origin_security,
            destination_security: self.destination_security,
            item_volume: None,
            revenue_per_cargo: None,
            route: None,
        })
    }
}
