//! Monetary and physical quantities.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Packaged transport volume (m3) represented as a Decimal.
pub type Volume = Decimal;

/// Security rating of a location.
pub type Security = Decimal;

/// Whole units of an item.
pub type Quantity = u64;

/// Percentage gained by buying at `buy_price` and selling at `sell_price`.
///
/// Returns `None` when `buy_price` is not positive or the result does not
/// fit in a `Decimal`.
pub fn margin_percent(buy_price: Price, sell_price: Price) -> Option<Decimal> {
    if buy_price <= Decimal::ZERO {
        return None;
    }
    sell_price
        .checked_div(buy_price)?
        .checked_sub(Decimal::ONE)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// Absolute profit across `quantity` units of a matched pair.
///
/// Returns `None` when the result does not fit in a `Decimal`.
pub fn revenue(quantity: Quantity, buy_price: Price, sell_price: Price) -> Option<Price> {
    Decimal::from(quantity).checked_mul(sell_price.checked_sub(buy_price)?)
}
