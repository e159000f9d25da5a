use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;
use tradelane::domain::Order;
use tradelane::testkit::domain::{ask, bid};
use tradelane::testkit::snapshot::{write_items, write_locations, write_orders, write_routes};

/// Snapshot files in a temporary directory.
pub struct Snapshot {
    dir: TempDir,
}

impl Snapshot {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// One Widget ask at A (0.8) and one bid at B (0.6).
    pub fn widget() -> Self {
        let snapshot = Self::new();
        snapshot.orders(&widget_orders());
        snapshot.locations(&[("A", dec!(0.8)), ("B", dec!(0.6))]);
        snapshot.items(&[("Widget", dec!(50))]);
        snapshot.routes(&[("A", "B", &["A", "C", "B"])]);
        snapshot
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn orders(&self, orders: &[Order]) -> PathBuf {
        let path = self.path("orders.csv");
        write_orders(&path, orders).expect("write orders");
        path
    }

    pub fn locations(&self, entries: &[(&str, Decimal)]) -> PathBuf {
        let path = self.path("locations.json");
        write_locations(&path, entries).expect("write locations");
        path
    }

    pub fn items(&self, entries: &[(&str, Decimal)]) -> PathBuf {
        let path = self.path("items.json");
        write_items(&path, entries).expect("write items");
        path
    }

    pub fn routes(&self, entries: &[(&str, &str, &[&str])]) -> PathBuf {
        let path = self.path("routes.json");
        write_routes(&path, entries).expect("write routes");
        path
    }

    /// Write `tradelane.toml` with `[input]` pointing at this snapshot,
    /// followed by `extra`.
    pub fn config(&self, extra: &str) -> PathBuf {
        let path = self.path("tradelane.toml");
        let content = format!(
            "[input]\norders = {:?}\nlocations = {:?}\nitems = {:?}\n\n[output]\nreport = {:?}\n\n{extra}",
            self.path("orders.csv"),
            self.path("locations.json"),
            self.path("items.json"),
            self.path("report.csv"),
        );
        fs::write(&path, content).expect("write config");
        path
    }

    pub fn report(&self) -> String {
        fs::read_to_string(self.path("report.csv")).expect("read report")
    }
}

pub fn widget_orders() -> Vec<Order> {
    vec![
        ask("Widget", dec!(100), 50, "A"),
        bid("Widget", dec!(150), 30, "B"),
    ]
}

/// Thresholds of the Widget scenario.
pub const WIDGET_SCAN: &str = "[scan]\nmin_margin = 30\nmax_item_purchase_price = 200\nmin_potential_revenue = 1000\nmin_system_security = 0.5\n";
