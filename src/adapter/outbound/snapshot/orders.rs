//! Orders CSV reader.
//!
//! The snapshot uses `|` as its quote character. Only the columns the
//! scanner needs are mapped; the rest of the row is ignored.

use std::fs::File;
use std::io;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::error::DomainError;
use crate::domain::{Item, Order, OrderStore, Place, Quantity, RegionFilter, Side};
use crate::error::SnapshotError;

/// Quote character of the snapshot CSV files.
pub const QUOTE: u8 = b'|';

/// One row of the orders CSV, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRow {
    /// Region identifier.
    pub region: String,
    pub region_name: String,
    /// `True`/`False` as written by the snapshot exporter.
    pub is_buy_order: String,
    /// Station the order sits at.
    #[serde(default)]
    pub location_id: Option<String>,
    #[serde(default)]
    pub min_volume: Quantity,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub system_id: String,
    pub system_name: String,
    pub type_id: String,
    pub type_name: String,
    pub volume_remain: Quantity,
}

impl TryFrom<OrderRow> for Order {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let side: Side = row.is_buy_order.parse()?;
        let mut place = Place::new(row.system_id, row.system_name, row.region, row.region_name);
        if let Some(station) = row.location_id.filter(|id| !id.is_empty()) {
            place = place.with_station(station);
        }
        Order::try_new(
            Item::new(row.type_id, row.type_name),
            side,
            row.price,
            row.volume_remain,
            row.min_volume,
            place,
        )
    }
}

/// Orders read from a snapshot.
#[derive(Debug, Clone, Default)]
pub struct OrderLoad {
    pub store: OrderStore,
    /// Data rows read.
    pub rows: usize,
    /// Rows dropped by the region filter.
    pub filtered: usize,
}

/// Read and validate an orders CSV file.
///
/// # Errors
///
/// Returns `SnapshotError` if the file cannot be opened, a row is malformed
/// or a row fails validation. The error names the offending line.
pub fn load_orders(path: &Path, filter: RegionFilter) -> Result<OrderLoad, SnapshotError> {
    let source_name = path.display().to_string();
    let file = File::open(path).map_err(|source| SnapshotError::Read {
        path: source_name.clone(),
        source,
    })?;
    let load = read_orders(file, &source_name, filter)?;
    info!(
        path = %source_name,
        rows = load.rows,
        kept = load.store.order_count(),
        items = load.store.len(),
        "Loaded orders"
    );
    Ok(load)
}

/// Read orders CSV from any reader. `source` names it in errors.
///
/// # Errors
///
/// Same as [`load_orders`].
pub fn read_orders<R: io::Read>(
    reader: R,
    source: &str,
    filter: RegionFilter,
) -> Result<OrderLoad, SnapshotError> {
    let csv_error = |e: csv::Error| SnapshotError::Csv {
        path: source.to_string(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new().quote(QUOTE).from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut load = OrderLoad::default();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record).map_err(csv_error)? {
        load.rows += 1;
        let line = record.position().map_or(0, csv::Position::line);
        let row: OrderRow = record.deserialize(Some(&headers)).map_err(csv_error)?;
        let order = Order::try_from(row).map_err(|e| SnapshotError::InvalidOrder {
            path: source.to_string(),
            line,
            source: e,
        })?;

        if filter.admits(&order) {
            load.store.insert(order);
        } else {
            load.filtered += 1;
        }
    }

    debug!(source, filtered = load.filtered, "Applied region filter");
    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use rust_decimal_macros::dec;

    const HEADER: &str = "region,region_name,duration,is_buy_order,issued,location_id,min_volume,order_id,price,range,system_id,system_name,type_id,type_name,volume_remain,volume_total";

    fn csv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn reads_both_sides() {
        let data = csv(&[
            "10000002,The Forge,90,False,2024-01-01T00:00:00Z,60003760,1,1,100.5,region,30000142,Jita,34,Tritanium,50,100",
            "10000043,Domain,90,True,2024-01-01T00:00:00Z,60008494,5,2,150,station,30002187,Amarr,34,Tritanium,30,30",
        ]);
        let load = read_orders(data.as_bytes(), "test", RegionFilter::All).unwrap();

        assert_eq!(load.rows, 2);
        let book = load.store.get(&ItemId::from("34")).unwrap();
        assert_eq!(book.asks()[0].price(), dec!(100.5));
        assert_eq!(book.asks()[0].location_name(), "Jita");
        assert_eq!(book.bids()[0].min_quantity(), 5);
        assert_eq!(book.bids()[0].region_name(), "Domain");
    }

    #[test]
    fn keeps_station_apart_from_system() {
        let data = csv(&[
            "10000002,The Forge,90,False,2024-01-01T00:00:00Z,60003760,1,1,100.5,region,30000142,Jita,34,Tritanium,50,100",
        ]);
        let load = read_orders(data.as_bytes(), "test", RegionFilter::All).unwrap();
        let place = load.store.books().next().unwrap().asks()[0].place().clone();

        assert_eq!(place.location_id.as_str(), "30000142");
        assert_eq!(place.station_id.as_ref().map(|id| id.as_str()), Some("60003760"));
        assert_eq!(place.site_id().as_str(), "60003760");
    }

    #[test]
    fn empty_station_falls_back_to_system() {
        let data = csv(&[
            "10000002,The Forge,90,False,x,,1,1,10,region,30000142,Jita,34,Tritanium,5,5",
        ]);
        let load = read_orders(data.as_bytes(), "test", RegionFilter::All).unwrap();
        let place = load.store.books().next().unwrap().asks()[0].place().clone();

        assert_eq!(place.station_id, None);
        assert_eq!(place.site_id().as_str(), "30000142");
    }

    #[test]
    fn honours_pipe_quoting() {
        let data = csv(&[
            "10000002,The Forge,90,False,x,1,1,1,10,region,30000142,Jita,35,|Pyerite, Compressed|,5,5",
        ]);
        let load = read_orders(data.as_bytes(), "test", RegionFilter::All).unwrap();
        let book = load.store.books().next().unwrap();
        assert_eq!(book.item().name, "Pyerite, Compressed");
    }

    #[test]
    fn region_filter_drops_rows() {
        let data = csv(&[
            "10000002,The Forge,90,False,x,1,1,1,10,region,30000142,Jita,34,Tritanium,5,5",
            "10000060,Delve,90,True,x,1,1,2,12,region,30004759,1DQ1-A,34,Tritanium,5,5",
        ]);
        let load = read_orders(data.as_bytes(), "test", RegionFilter::SafeOnly).unwrap();
        assert_eq!(load.rows, 2);
        assert_eq!(load.filtered, 1);
        assert_eq!(load.store.order_count(), 1);
    }

    #[test]
    fn invalid_side_names_the_line() {
        let data = csv(&[
            "10000002,The Forge,90,False,x,1,1,1,10,region,30000142,Jita,34,Tritanium,5,5",
            "10000002,The Forge,90,maybe,x,1,1,1,10,region,30000142,Jita,34,Tritanium,5,5",
        ]);
        let err = read_orders(data.as_bytes(), "orders.csv", RegionFilter::All).unwrap_err();
        match err {
            SnapshotError::InvalidOrder { line, source, .. } => {
                assert_eq!(line, 3);
                assert!(matches!(source, DomainError::InvalidSide { .. }));
            }
            other => panic!("expected invalid order, got {other}"),
        }
    }

    #[test]
    fn zero_price_is_rejected() {
        let data = csv(&[
            "10000002,The Forge,90,False,x,1,1,1,0,region,30000142,Jita,34,Tritanium,5,5",
        ]);
        let err = read_orders(data.as_bytes(), "test", RegionFilter::All).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::InvalidOrder {
                source: DomainError::NonPositivePrice { .. },
                ..
            }
        ));
    }

    #[test]
    fn missing_column_is_a_csv_error() {
        let data = "region,region_name\n1,The Forge";
        let err = read_orders(data.as_bytes(), "test", RegionFilter::All).unwrap_err();
        assert!(matches!(err, SnapshotError::Csv { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_orders(Path::new("/nonexistent/orders.csv"), RegionFilter::All)
            .unwrap_err();
        assert!(matches!(err, SnapshotError::Read { .. }));
    }
}
