//! Best single-order price lookup for one item.

use super::location::RegionFilter;
use super::money::Quantity;
use super::order::{Order, Side};
use super::orderbook::OrderStore;

/// Parameters for a best-price query.
#[derive(Debug, Clone)]
pub struct PriceQuery<'a> {
    pub item_name: &'a str,
    pub side: Side,
    /// Orders with fewer remaining units are ignored.
    pub min_quantity: Quantity,
    pub regions: RegionFilter,
}

/// Best order on one side of an item's book.
///
/// For bids this is the highest price (the best place to sell into); for
/// asks the lowest price (the cheapest place to buy from). Returns `None`
/// when no order matches the item, side, quantity and region filter.
pub fn best_price<'s>(store: &'s OrderStore, query: &PriceQuery<'_>) -> Option<&'s Order> {
    let book = store.by_name(query.item_name)?;
    let candidates = book
        .side(query.side)
        .iter()
        .filter(|order| order.quantity_remaining() >= query.min_quantity)
        .filter(|order| query.regions.admits(order));

    match query.side {
        Side::Bid => candidates.max_by(|a, b| a.price().cmp(&b.price())),
        Side::Ask => candidates.min_by(|a, b| a.price().cmp(&b.price())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Item, Place};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn order(side: Side, price: Decimal, qty: Quantity, region: &str) -> Order {
        Order::try_new(
            Item::new("34", "Tritanium"),
            side,
            price,
            qty,
            1,
            Place::new("1", "Somewhere", "r", region),
        )
        .unwrap()
    }

    fn store() -> OrderStore {
        OrderStore::from_orders(vec![
            order(Side::Bid, dec!(5.0), 100, "The Forge"),
            order(Side::Bid, dec!(6.0), 10, "The Forge"),
            order(Side::Bid, dec!(7.0), 500, "Delve"),
            order(Side::Ask, dec!(4.0), 50, "Domain"),
            order(Side::Ask, dec!(3.0), 5, "Domain"),
        ])
    }

    fn query(side: Side, min_quantity: Quantity, regions: RegionFilter) -> PriceQuery<'static> {
        PriceQuery {
            item_name: "Tritanium",
            side,
            min_quantity,
            regions,
        }
    }

    #[test]
    fn highest_bid_wins() {
        let store = store();
        let best = best_price(&store, &query(Side::Bid, 1, RegionFilter::All)).unwrap();
        assert_eq!(best.price(), dec!(7.0));
    }

    #[test]
    fn safe_regions_skip_unsafe_bids() {
        let store = store();
        let best = best_price(&store, &query(Side::Bid, 1, RegionFilter::SafeOnly)).unwrap();
        assert_eq!(best.price(), dec!(6.0));
    }

    #[test]
    fn quantity_floor_filters_small_orders() {
        let store = store();
        let best = best_price(&store, &query(Side::Bid, 50, RegionFilter::SafeOnly)).unwrap();
        assert_eq!(best.price(), dec!(5.0));

        let cheapest = best_price(&store, &query(Side::Ask, 10, RegionFilter::All)).unwrap();
        assert_eq!(cheapest.price(), dec!(4.0));
    }

    #[test]
    fn lowest_ask_wins() {
        let store = store();
        let best = best_price(&store, &query(Side::Ask, 1, RegionFilter::All)).unwrap();
        assert_eq!(best.price(), dec!(3.0));
    }

    #[test]
    fn unknown_item_yields_none() {
        let store = store();
        let mut q = query(Side::Ask, 1, RegionFilter::All);
        q.item_name = "Pyerite";
        assert!(best_price(&store, &q).is_none());
    }
}
