//! Item-indexed order store.

use std::collections::{BTreeMap, BTreeSet};

use super::id::ItemId;
use super::location::RegionFilter;
use super::order::{Item, Order, Side};

/// All standing orders for one item, partitioned by side.
#[derive(Debug, Clone)]
pub struct ItemBook {
    item: Item,
    asks: Vec<Order>,
    bids: Vec<Order>,
}

impl ItemBook {
    fn new(item: Item) -> Self {
        Self {
            item,
            asks: Vec::new(),
            bids: Vec::new(),
        }
    }

    fn push(&mut self, order: Order) {
        match order.side() {
            Side::Ask => self.asks.push(order),
            Side::Bid => self.bids.push(order),
        }
    }

    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Sell orders, in arbitrary order.
    pub fn asks(&self) -> &[Order] {
        &self.asks
    }

    /// Buy orders, in arbitrary order.
    pub fn bids(&self) -> &[Order] {
        &self.bids
    }

    /// Orders on one side.
    pub fn side(&self, side: Side) -> &[Order] {
        match side {
            Side::Ask => &self.asks,
            Side::Bid => &self.bids,
        }
    }

    /// Whether both sides have at least one order.
    pub fn is_two_sided(&self) -> bool {
        !self.asks.is_empty() && !self.bids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.asks.len() + self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read-only view over a snapshot of orders, grouped by item.
///
/// Matching only ever compares orders inside one [`ItemBook`], which is what
/// keeps the cross product per item instead of across the whole snapshot.
#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    books: BTreeMap<ItemId, ItemBook>,
}

impl OrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat collection of orders by item.
    pub fn from_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let mut store = Self::new();
        for order in orders {
            store.insert(order);
        }
        store
    }

    /// Add one order to its item's book.
    pub fn insert(&mut self, order: Order) {
        self.books
            .entry(order.item_id().clone())
            .or_insert_with(|| ItemBook::new(order.item().clone()))
            .push(order);
    }

    /// Book for one item.
    pub fn get(&self, item_id: &ItemId) -> Option<&ItemBook> {
        self.books.get(item_id)
    }

    /// Book for an item looked up by display name.
    pub fn by_name(&self, item_name: &str) -> Option<&ItemBook> {
        self.books.values().find(|book| book.item.name == item_name)
    }

    /// All item books.
    pub fn books(&self) -> impl Iterator<Item = &ItemBook> {
        self.books.values()
    }

    /// Item books as a slice-like vector, for parallel iteration.
    pub fn book_refs(&self) -> Vec<&ItemBook> {
        self.books.values().collect()
    }

    /// Distinct location names referenced by any order.
    pub fn location_names(&self) -> BTreeSet<&str> {
        self.books
            .values()
            .flat_map(|book| book.asks.iter().chain(book.bids.iter()))
            .map(Order::location_name)
            .collect()
    }

    /// Copy of the store holding only orders the filter admits.
    pub fn restricted(&self, filter: RegionFilter) -> Self {
        self.books()
            .flat_map(|book| book.asks.iter().chain(book.bids.iter()))
            .filter(|order| filter.admits(order))
            .cloned()
            .collect()
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Total number of orders across all items.
    pub fn order_count(&self) -> usize {
        self.books.values().map(ItemBook::len).sum()
    }
}

impl FromIterator<Order> for OrderStore {
    fn from_iter<I: IntoIterator<Item = Order>>(iter: I) -> Self {
        Self::from_orders(iter)
    }
}
