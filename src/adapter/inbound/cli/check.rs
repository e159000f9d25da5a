//! Handler for `check config`.

use std::path::Path;

use serde_json::json;

use super::{config, output};
use crate::adapter::outbound::snapshot::{load_locations, load_orders, ItemTable, RouteTable};
use crate::error::{ConfigError, Result};

/// Outcome of one readiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    fn pass(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            detail: detail.into(),
        }
    }

    fn fail(name: &'static str, detail: impl Into<String>) -> Self {
        Self {
            name,
            passed: false,
            detail: detail.into(),
        }
    }
}

/// Validate the configuration and every snapshot file it names.
///
/// # Errors
///
/// Returns the configuration error when the file itself is invalid, or
/// `ConfigError::Other` when any snapshot file fails to load.
pub fn execute_config(path: &Path) -> Result<()> {
    let config = config::load(path)?;
    let results = run_checks(&config);

    if output::is_json() {
        let checks: Vec<_> = results
            .iter()
            .map(|r| json!({ "name": r.name, "passed": r.passed, "detail": r.detail }))
            .collect();
        output::record("check", json!({ "config": path.display().to_string(), "checks": checks }));
    } else {
        output::section("Configuration Check");
        output::field("Config", path.display());
        output::success("Configuration is valid");
        for result in &results {
            if result.passed {
                output::success(&format!("{}: {}", result.name, result.detail));
            } else {
                output::error(&format!("{}: {}", result.name, result.detail));
            }
        }
    }

    let failed = results.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        return Err(ConfigError::Other(format!("{failed} snapshot check(s) failed")).into());
    }
    output::success("Ready to scan");
    Ok(())
}

/// Load each configured snapshot file and describe the outcome.
pub fn run_checks(config: &crate::config::Config) -> Vec<CheckResult> {
    let scan = config.scan_config();
    let mut results = Vec::new();

    results.push(match load_locations(&config.input.locations) {
        Ok(table) => CheckResult::pass("locations", format!("{} locations", table.len())),
        Err(e) => CheckResult::fail("locations", e.to_string()),
    });

    results.push(match load_orders(&config.input.orders, scan.region_filter()) {
        Ok(load) => CheckResult::pass(
            "orders",
            format!("{} orders, {} items", load.store.order_count(), load.store.len()),
        ),
        Err(e) => CheckResult::fail("orders", e.to_string()),
    });

    if let Some(items) = &config.input.items {
        results.push(match ItemTable::load(items) {
            Ok(table) => CheckResult::pass("items", format!("{} items", table.len())),
            Err(e) => CheckResult::fail("items", e.to_string()),
        });
    }

    if let (true, Some(table)) = (config.routes.enabled, &config.routes.table) {
        results.push(match RouteTable::load(table) {
            Ok(routes) => CheckResult::pass("routes", format!("{} routes", routes.len())),
            Err(e) => CheckResult::fail("routes", e.to_string()),
        });
    }

    results
}
