//! Builders for domain primitives used across tests.
//!
//! Item and location ids are derived from their names so scenarios can be
//! written with names alone.

use rust_decimal::Decimal;

use crate::domain::{Item, Opportunity, Order, Place, Price, Quantity, SecurityTable, Side};

/// Region used when a test does not care.
pub const FORGE: &str = "The Forge";

/// Create a [`Place`] whose ids equal its names.
pub fn place(location_name: &str, region_name: &str) -> Place {
    Place::new(location_name, location_name, region_name, region_name)
}

/// Create an order with min quantity 1 in [`FORGE`].
///
/// # Panics
///
/// Panics if the order is invalid (zero price or quantity).
pub fn order(
    item_name: &str,
    side: Side,
    price: Price,
    quantity: Quantity,
    location_name: &str,
) -> Order {
    Order::try_new(
        Item::new(item_name, item_name),
        side,
        price,
        quantity,
        1,
        place(location_name, FORGE),
    )
    .expect("valid test order")
}

/// A sell order: the price a trader can buy at.
pub fn ask(item_name: &str, price: Price, quantity: Quantity, location_name: &str) -> Order {
    order(item_name, Side::Ask, price, quantity, location_name)
}

/// A buy order: the price a trader can sell at.
pub fn bid(item_name: &str, price: Price, quantity: Quantity, location_name: &str) -> Order {
    order(item_name, Side::Bid, price, quantity, location_name)
}

/// Same order moved to another region.
///
/// # Panics
///
/// Panics if `order` was itself invalid.
pub fn in_region(order: &Order, region_name: &str) -> Order {
    Order::try_new(
        order.item().clone(),
        order.side(),
        order.price(),
        order.quantity_remaining(),
        order.min_quantity(),
        place(order.location_name(), region_name),
    )
    .expect("valid test order")
}

/// Build a security table from `(location, rating)` pairs.
pub fn security(entries: &[(&str, Decimal)]) -> SecurityTable {
    entries
        .iter()
        .map(|(name, rating)| ((*name).to_string(), *rating))
        .collect()
}

/// Pair an ask with a bid, without security ratings.
///
/// # Panics
///
/// Panics if the orders are for different items or the wrong sides.
pub fn opportunity(ask: &Order, bid: &Order) -> Opportunity {
    Opportunity::builder()
        .ask(ask)
        .bid(bid)
        .build()
        .expect("valid test opportunity")
}
