//! Writers for snapshot files in the on-disk formats the loaders read.

use std::fs;
use std::io;
use std::path::Path;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

use crate::domain::{Order, Side};

/// Header of the orders CSV export.
pub const ORDERS_HEADER: &str = "region,region_name,duration,is_buy_order,issued,location_id,min_volume,order_id,price,range,system_id,system_name,type_id,type_name,volume_remain,volume_total";

fn quoted(field: &str) -> String {
    if field.contains(',') {
        format!("|{field}|")
    } else {
        field.to_string()
    }
}

/// Render `orders` as an orders CSV document, header included.
pub fn orders_csv(orders: &[Order]) -> String {
    let mut out = String::from(ORDERS_HEADER);
    for (index, order) in orders.iter().enumerate() {
        let place = order.place();
        let is_buy = match order.side() {
            Side::Bid => "True",
            Side::Ask => "False",
        };
        out.push('\n');
        out.push_str(&format!(
            "{},{},90,{},2024-01-01T00:00:00Z,{},{},{},{},region,{},{},{},{},{},{}",
            quoted(place.region_id.as_str()),
            quoted(&place.region_name),
            is_buy,
            quoted(place.site_id().as_str()),
            order.min_quantity(),
            index + 1,
            order.price(),
            quoted(place.location_id.as_str()),
            quoted(&place.location_name),
            quoted(order.item_id().as_str()),
            quoted(order.item_name()),
            order.quantity_remaining(),
            order.quantity_remaining(),
        ));
    }
    out.push('\n');
    out
}

/// Write an orders CSV file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_orders(path: &Path, orders: &[Order]) -> io::Result<()> {
    fs::write(path, orders_csv(orders))
}

/// Write a location table from `(name, security)` pairs.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_locations(path: &Path, entries: &[(&str, Decimal)]) -> io::Result<()> {
    let table: Map<String, Value> = entries
        .iter()
        .map(|(name, rating)| {
            let rating = rating.to_f64().unwrap_or_default();
            ((*name).to_string(), json!({ "security_status": rating }))
        })
        .collect();
    fs::write(path, Value::Object(table).to_string())
}

/// Write an item table from `(name, packaged volume)` pairs.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_items(path: &Path, entries: &[(&str, Decimal)]) -> io::Result<()> {
    let table: Map<String, Value> = entries
        .iter()
        .map(|(name, volume)| {
            let volume = volume.to_f64().unwrap_or_default();
            ((*name).to_string(), json!({ "packaged_volume": volume }))
        })
        .collect();
    fs::write(path, Value::Object(table).to_string())
}

/// Write a route table from `(origin, destination, waypoints)` entries.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_routes(path: &Path, entries: &[(&str, &str, &[&str])]) -> io::Result<()> {
    let table: Vec<Value> = entries
        .iter()
        .map(|(origin, destination, route)| {
            json!({ "origin": origin, "destination": destination, "route": route })
        })
        .collect();
    fs::write(path, Value::Array(table).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::snapshot::read_orders;
    use crate::domain::RegionFilter;
    use crate::testkit::domain::{ask, bid};
    use rust_decimal_macros::dec;

    #[test]
    fn written_orders_read_back() {
        let orders = vec![
            ask("Pyerite, Compressed", dec!(10.5), 7, "Jita"),
            bid("Pyerite, Compressed", dec!(12), 3, "Amarr"),
        ];
        let csv = orders_csv(&orders);
        let load = read_orders(csv.as_bytes(), "inline", RegionFilter::All).unwrap();
        assert_eq!(load.rows, 2);
        let book = load.store.by_name("Pyerite, Compressed").unwrap();
        assert_eq!(book.asks()[0].price(), dec!(10.5));
        assert_eq!(book.bids()[0].quantity_remaining(), 3);
    }
}
