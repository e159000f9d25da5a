//! Snapshot files on disk through the scanner and into the report.

mod support;

use std::collections::HashMap;

use rust_decimal_macros::dec;
use support::snapshot::{widget_orders, Snapshot};
use tradelane::adapter::outbound::report::{save_report, COLUMNS};
use tradelane::adapter::outbound::snapshot::{
    load_locations, load_orders, ItemTable, RouteTable, QUOTE,
};
use tradelane::application::{MatchConfig, RouteConfig, ScanConfig, Scanner};
use tradelane::domain::RegionFilter;
use tradelane::error::{Error, SnapshotError};
use tradelane::testkit::domain::in_region;

fn widget_config() -> ScanConfig {
    ScanConfig {
        matching: MatchConfig {
            min_margin: dec!(30),
            max_buy_price: dec!(200),
            min_revenue: dec!(1000),
            min_security: dec!(0.5),
        },
        routes: RouteConfig {
            enabled: true,
            ..RouteConfig::default()
        },
        ..ScanConfig::default()
    }
}

fn read_report(content: &str) -> Vec<HashMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .quote(QUOTE)
        .from_reader(content.as_bytes());
    reader.deserialize().map(Result::unwrap).collect()
}

#[test]
fn scan_from_files_writes_full_report_row() {
    let snapshot = Snapshot::widget();
    let locations = load_locations(&snapshot.path("locations.json")).unwrap();
    let orders = load_orders(&snapshot.path("orders.csv"), RegionFilter::All).unwrap();
    let items = ItemTable::load(&snapshot.path("items.json")).unwrap();
    let routes = RouteTable::load(&snapshot.path("routes.json")).unwrap();

    let config = widget_config();
    let report = Scanner::new(&config, &locations)
        .with_item_lookup(&items)
        .with_route_lookup(&routes)
        .run(&orders.store)
        .unwrap();
    let path = snapshot.path("out/report.csv");
    let written = save_report(&path, report.ranked()).unwrap();
    assert_eq!(written, 1);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with(&COLUMNS.join(",")));
    let rows = read_report(&content);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["item"], "Widget");
    assert_eq!(row["buy_in_location_name"], "A");
    assert_eq!(row["sell_in_location_name"], "B");
    assert_eq!(row["margin"], "50");
    assert_eq!(row["transactable_quantity"], "30");
    assert_eq!(row["potential_revenue"], "1500");
    assert_eq!(row["buy_location_security"], "0.8");
    assert_eq!(row["item_volume"], "50");
    assert_eq!(row["potential_revenue_per_cargo"], "");
    assert_eq!(row["route"], "A-C-B");
    assert_eq!(row["route_jumps"], "3");
}

#[test]
fn empty_scan_still_writes_header() {
    let snapshot = Snapshot::new();
    let path = snapshot.path("report.csv");
    assert_eq!(save_report(&path, []).unwrap(), 0);
    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.trim_end(), COLUMNS.join(","));
}

#[test]
fn loader_region_filter_counts_dropped_rows() {
    let snapshot = Snapshot::new();
    let mut orders = widget_orders();
    orders.push(in_region(&orders[1], "Delve"));
    snapshot.orders(&orders);

    let load = load_orders(&snapshot.path("orders.csv"), RegionFilter::SafeOnly).unwrap();
    assert_eq!(load.rows, 3);
    assert_eq!(load.filtered, 1);
    assert_eq!(load.store.order_count(), 2);
}

#[test]
fn malformed_location_table_names_the_file() {
    let snapshot = Snapshot::new();
    let path = snapshot.path("locations.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_locations(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Json { .. }));
    assert!(Error::from(err).to_string().contains("locations.json"));
}
