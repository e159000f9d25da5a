//! Handler for the `scan` command.

use serde_json::json;
use tracing::info;

use super::command::ScanArgs;
use super::progress::ProgressObserver;
use super::{config, output, table};
use crate::adapter::outbound::report::{save_report, ReportRow};
use crate::adapter::outbound::snapshot::{
    load_locations, load_orders, ItemTable, OrderLoad, RouteTable,
};
use crate::application::{ScanReport, Scanner};
use crate::config::Config;
use crate::domain::SecurityTable;
use crate::error::Result;
use crate::port::{ItemVolumeLookup, RouteLookup};

/// Execute the scan command.
pub fn execute(args: &ScanArgs) -> Result<()> {
    let mut config = config::load(&args.config)?;
    apply_overrides(&mut config, args);
    config.validate()?;
    config
        .logging
        .with_verbosity(output::verbosity(), output::is_quiet())
        .init();

    let scan = config.scan_config();
    output::header(env!("CARGO_PKG_VERSION"));

    let spinner = output::spinner("Loading snapshot");
    let loaded = load_snapshot(&config);
    let (locations, orders, items, routes) = match loaded {
        Ok(snapshot) => snapshot,
        Err(e) => {
            output::spinner_fail(&spinner, "Failed to load snapshot");
            return Err(e);
        }
    };
    output::spinner_success(
        &spinner,
        &format!(
            "Loaded {} orders for {} items across {} locations",
            orders.store.order_count(),
            orders.store.len(),
            locations.len()
        ),
    );

    let observer = ProgressObserver::new();
    let mut scanner = Scanner::new(&scan, &locations).with_observer(&observer);
    if let Some(items) = &items {
        scanner = scanner.with_item_lookup(items as &dyn ItemVolumeLookup);
    }
    if let Some(routes) = &routes {
        scanner = scanner.with_route_lookup(routes as &dyn RouteLookup);
    }
    let report = scanner.run(&orders.store)?;

    let written = if args.no_report {
        None
    } else {
        let ranked = report.ranked();
        Some(save_report(&config.output.report, ranked)?)
    };

    print_report(&config, &report, written);
    info!(reported = report.opportunities.len(), "Scan finished");
    Ok(())
}

type Snapshot = (SecurityTable, OrderLoad, Option<ItemTable>, Option<RouteTable>);

fn load_snapshot(config: &Config) -> Result<Snapshot> {
    let locations = load_locations(&config.input.locations)?;
    let orders = load_orders(&config.input.orders, config.scan_config().region_filter())?;
    let items = config.input.items.as_deref().map(ItemTable::load).transpose()?;
    let routes = if config.routes.enabled {
        config.routes.table.as_deref().map(RouteTable::load).transpose()?
    } else {
        None
    };
    Ok((locations, orders, items, routes))
}

/// Apply command-line flags on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, args: &ScanArgs) {
    let thresholds = &mut config.scan.thresholds;
    if let Some(value) = args.min_margin {
        thresholds.min_margin = value;
    }
    if let Some(value) = args.max_item_purchase_price {
        thresholds.max_buy_price = value;
    }
    if let Some(value) = args.min_potential_revenue {
        thresholds.min_revenue = value;
    }
    if let Some(value) = args.min_system_security {
        thresholds.min_security = value;
    }

    if args.safe_regions {
        config.scan.safe_regions = true;
    }
    if args.parallel {
        config.scan.parallel = true;
    }

    if let Some(capacity) = args.cargo_capacity {
        config.cargo.capacity = capacity;
        config.cargo.enabled = true;
    }
    if args.single_cargo {
        config.cargo.enabled = true;
    }

    if let Some(table) = &args.route_table {
        config.routes.table = Some(table.clone());
        config.routes.enabled = true;
    }
    if args.routes {
        config.routes.enabled = true;
    }
    if let Some(policy) = args.route_failure {
        config.routes.failure = policy.into();
    }

    if let Some(path) = &args.orders {
        config.input.orders = path.clone();
    }
    if let Some(path) = &args.locations {
        config.input.locations = path.clone();
    }
    if let Some(path) = &args.items {
        config.input.items = Some(path.clone());
    }
    if let Some(path) = &args.output {
        config.output.report = path.clone();
    }
    if let Some(top) = args.top {
        config.output.top = top;
    }
}

fn print_report(config: &Config, report: &ScanReport, written: Option<usize>) {
    let ranked = report.ranked();

    if output::is_json() {
        let rows: Vec<ReportRow> = ranked.iter().map(|o| ReportRow::from(*o)).collect();
        let failures: Vec<_> = report
            .route_failures
            .iter()
            .map(|f| {
                json!({
                    "origin": f.origin.as_str(),
                    "origin_name": f.origin_name,
                    "destination": f.destination.as_str(),
                    "destination_name": f.destination_name,
                    "error": f.error.to_string(),
                })
            })
            .collect();
        let missing_items: Vec<_> = report
            .missing_items
            .iter()
            .map(|(item, e)| json!({ "item": item, "error": e.to_string() }))
            .collect();
        output::record(
            "scan",
            json!({
                "stats": report.stats,
                "report": written.map(|_| config.output.report.display().to_string()),
                "opportunities": rows,
                "route_failures": failures,
                "missing_locations": report.missing_locations,
                "missing_items": missing_items,
            }),
        );
        return;
    }

    if !report.missing_locations.is_empty() {
        output::warning(&format!(
            "{} locations have no security rating and were treated as unsafe",
            report.missing_locations.len()
        ));
    }
    for (item, error) in &report.missing_items {
        output::warning(&format!("No volume for {item}: {error}"));
    }
    for failure in &report.route_failures {
        output::warning(&format!(
            "No route {} -> {}: {}",
            failure.origin_name, failure.destination_name, failure.error
        ));
    }

    let stats = &report.stats;
    output::section("Summary");
    output::field("Orders", stats.orders);
    output::field("Items", format!("{} ({} two-sided)", stats.items, stats.items_two_sided));
    output::field("Pairs", stats.pairs_compared);
    output::field("Matched", stats.matched);
    if config.cargo.enabled {
        output::field("After cargo", stats.after_cargo);
    }
    if config.routes.enabled {
        output::field(
            "Routes",
            format!("{} looked up, {} failed", stats.route_lookups, stats.route_failures),
        );
    }
    output::field("Reported", output::positive(stats.reported));

    if ranked.is_empty() {
        output::note("No opportunities cleared the thresholds.");
        output::hint("lower --min-margin or --min-potential-revenue to widen the search");
    } else {
        output::section(&format!(
            "Top {}",
            config.output.top.min(ranked.len())
        ));
        output::lines(&table::render(ranked.iter().copied(), config.output.top));
    }

    if written.is_some() {
        output::success(&format!(
            "Report written to {}",
            output::highlight(config.output.report.display())
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::RouteFailurePolicy;
    use crate::adapter::inbound::cli::command::RouteFailureArg;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    #[test]
    fn flags_override_file_values() {
        let mut config = Config::default();
        let args = ScanArgs {
            min_margin: Some(dec!(5)),
            min_system_security: Some(dec!(0.9)),
            cargo_capacity: Some(dec!(600)),
            route_table: Some(PathBuf::from("routes.json")),
            route_failure: Some(RouteFailureArg::Abort),
            orders: Some(PathBuf::from("o.csv")),
            top: Some(3),
            parallel: true,
            ..ScanArgs::default()
        };

        apply_overrides(&mut config, &args);

        assert_eq!(config.scan.thresholds.min_margin, dec!(5));
        assert_eq!(config.scan.thresholds.min_security, dec!(0.9));
        assert_eq!(config.scan.thresholds.min_revenue, dec!(5000000));
        assert!(config.cargo.enabled);
        assert_eq!(config.cargo.capacity, dec!(600));
        assert!(config.routes.enabled);
        assert_eq!(config.routes.failure, RouteFailurePolicy::Abort);
        assert_eq!(config.input.orders, PathBuf::from("o.csv"));
        assert_eq!(config.output.top, 3);
        assert!(config.scan.parallel);
        assert!(!config.scan.safe_regions);
    }

    #[test]
    fn no_flags_keep_config() {
        let mut config = Config::default();
        apply_overrides(&mut config, &ScanArgs::default());
        assert_eq!(config, Config::default());
    }
}
