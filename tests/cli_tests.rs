//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use support::snapshot::{Snapshot, WIDGET_SCAN};

fn tradelane() -> Command {
    cargo_bin_cmd!("tradelane")
}

#[test]
fn test_help_lists_commands() {
    tradelane()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("best-price"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_version() {
    tradelane()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tradelane"));
}

#[test]
fn test_scan_writes_report() {
    let snapshot = Snapshot::widget();
    let config = snapshot.config(WIDGET_SCAN);

    tradelane()
        .args(["--color", "never", "scan", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Widget"))
        .stdout(predicate::str::contains("Report written to"));

    let report = snapshot.report();
    assert!(report.starts_with("item_id,item,"));
    let expected = "Widget,The Forge,A,A,The Forge,B,B,100,150,1,1,50,30,50,30,1500,0.8,0.6,50,,,";
    assert!(report.contains(expected), "unexpected report:\n{report}");
}

#[test]
fn test_scan_flags_override_config() {
    let snapshot = Snapshot::widget();
    let config = snapshot.config(WIDGET_SCAN);

    tradelane()
        .args(["scan", "--min-system-security", "0.7", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("No opportunities")
                .and(predicate::str::contains("hint"))
                .and(predicate::str::contains("widen the search")),
        );

    let report = snapshot.report();
    assert_eq!(report.lines().count(), 1);
}

#[test]
fn test_scan_json_output() {
    let snapshot = Snapshot::widget();
    let config = snapshot.config(WIDGET_SCAN);

    tradelane()
        .args(["--json", "scan", "--routes", "--no-report", "--route-table"])
        .arg(snapshot.path("routes.json"))
        .arg("-c")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"scan\""))
        .stdout(predicate::str::contains("\"route\":\"A-C-B\""))
        .stdout(predicate::str::contains("\"reported\":1"));

    assert!(!snapshot.path("report.csv").exists());
}

#[test]
fn test_scan_cargo_mode_drops_widget() {
    let snapshot = Snapshot::widget();
    let config = snapshot.config(WIDGET_SCAN);

    tradelane()
        .args(["--json", "scan", "--cargo-capacity", "600", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"after_cargo\":0"));
}

#[test]
fn test_scan_cargo_without_items_fails() {
    let snapshot = Snapshot::widget();
    let config = snapshot.path("bare.toml");
    std::fs::write(&config, "[cargo]\nenabled = true\ncapacity = 600\n").unwrap();

    tradelane()
        .args(["scan", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("input.items"));
}

#[test]
fn test_scan_missing_orders_fails() {
    let snapshot = Snapshot::widget();
    let config = snapshot.config(WIDGET_SCAN);

    tradelane()
        .args(["scan", "--orders"])
        .arg(snapshot.path("nope.csv"))
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.csv"));
}

#[test]
fn test_best_price_bid_and_ask() {
    let snapshot = Snapshot::widget();
    let config = snapshot.config(WIDGET_SCAN);

    tradelane()
        .args(["best-price", "Widget", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("150"))
        .stdout(predicate::str::contains("B"));

    tradelane()
        .args(["--json", "best-price", "Widget", "--side", "ask", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"price\":\"100\""));
}

#[test]
fn test_best_price_none_is_not_an_error() {
    let snapshot = Snapshot::widget();
    let config = snapshot.config(WIDGET_SCAN);

    tradelane()
        .args(["best-price", "Widget", "--quantity", "31", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("No bid order"));
}

#[test]
fn test_check_config_passes() {
    let snapshot = Snapshot::widget();
    let config = snapshot.config(WIDGET_SCAN);

    tradelane()
        .args(["check", "config", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ready to scan"));
}

#[test]
fn test_check_config_reports_missing_file() {
    let snapshot = Snapshot::new();
    let config = snapshot.config("");

    tradelane()
        .args(["check", "config", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("orders"));
}

#[test]
fn test_config_parse_error_is_nonzero() {
    let snapshot = Snapshot::new();
    let config = snapshot.path("broken.toml");
    std::fs::write(&config, "[scan]\nmin_margin = \"high\"\n").unwrap();

    tradelane()
        .args(["config", "show", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("min_margin"));
}

#[test]
fn test_config_init_then_show() {
    let snapshot = Snapshot::new();
    let config = snapshot.path("tradelane.toml");

    tradelane()
        .args(["config", "init"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    tradelane()
        .args(["config", "init"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    tradelane()
        .args(["--json", "config", "show", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"min_margin\":\"30\""));
}
