//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tradelane binary using `clap`. Every
//! subcommand reads the same TOML configuration; flags override the file.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::application::RouteFailurePolicy;
use crate::domain::{Quantity, Side};

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "tradelane.toml";

/// Cross-market order book arbitrage scanner
#[derive(Parser, Debug)]
#[command(name = "tradelane")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan an order snapshot for arbitrage opportunities
    Scan(Box<ScanArgs>),

    /// Find the best price for one item
    BestPrice(BestPriceArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `tradelane config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
}

/// Subcommands for `tradelane check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file and the snapshot files it names.
    Config(ConfigPathArg),
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the template.
    #[arg(default_value = DEFAULT_CONFIG)]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `scan` subcommand.
///
/// Every flag is optional; unset flags keep the configuration file value.
#[derive(Parser, Debug, Default)]
pub struct ScanArgs {
    /// Path to the configuration file (optional; defaults apply if absent).
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Orders CSV.
    #[arg(long)]
    pub orders: Option<PathBuf>,

    /// Location security table (JSON).
    #[arg(long)]
    pub locations: Option<PathBuf>,

    /// Item volume table (JSON).
    #[arg(long)]
    pub items: Option<PathBuf>,

    /// Route table (JSON). Implies --routes.
    #[arg(long)]
    pub route_table: Option<PathBuf>,

    /// Report CSV destination.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Minimum margin in percent.
    #[arg(long)]
    pub min_margin: Option<Decimal>,

    /// Never buy from sell orders priced above this.
    #[arg(long)]
    pub max_item_purchase_price: Option<Decimal>,

    /// Minimum potential revenue per opportunity.
    #[arg(long)]
    pub min_potential_revenue: Option<Decimal>,

    /// Minimum security rating of both locations.
    #[arg(long)]
    pub min_system_security: Option<Decimal>,

    /// Re-rank by revenue per cargo load of this capacity.
    #[arg(long)]
    pub cargo_capacity: Option<Decimal>,

    /// Enable single cargo mode (requires a capacity).
    #[arg(long)]
    pub single_cargo: bool,

    /// Attach routes to opportunities.
    #[arg(long)]
    pub routes: bool,

    /// What to do when a route cannot be resolved.
    #[arg(long, value_enum)]
    pub route_failure: Option<RouteFailureArg>,

    /// Only consider orders in the safe-region list.
    #[arg(long)]
    pub safe_regions: bool,

    /// Match items in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Rows in the summary table.
    #[arg(long)]
    pub top: Option<usize>,

    /// Skip writing the report file.
    #[arg(long)]
    pub no_report: bool,
}

/// Route failure policy as a CLI value.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum RouteFailureArg {
    /// Drop opportunities on unresolved pairs.
    Exclude,
    /// Fail the scan.
    Abort,
}

impl From<RouteFailureArg> for RouteFailurePolicy {
    fn from(arg: RouteFailureArg) -> Self {
        match arg {
            RouteFailureArg::Exclude => Self::Exclude,
            RouteFailureArg::Abort => Self::Abort,
        }
    }
}

/// Arguments for the `best-price` subcommand.
#[derive(Parser, Debug)]
pub struct BestPriceArgs {
    /// Item display name.
    pub item: String,

    /// Side to query: `bid` finds the highest buy order, `ask` the lowest
    /// sell order.
    #[arg(long, default_value = "bid")]
    pub side: Side,

    /// Minimum remaining quantity on the order.
    #[arg(long, default_value_t = 1)]
    pub quantity: Quantity,

    /// Only consider safe regions.
    #[arg(long)]
    pub safe_regions: bool,

    /// Orders CSV (overrides the configuration file).
    #[arg(long)]
    pub orders: Option<PathBuf>,

    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rust_decimal_macros::dec;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_scan_overrides() {
        let cli = Cli::try_parse_from([
            "tradelane",
            "scan",
            "--min-margin",
            "12.5",
            "--cargo-capacity",
            "600",
            "--single-cargo",
            "--route-failure",
            "abort",
        ])
        .unwrap();

        let Commands::Scan(args) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(args.min_margin, Some(dec!(12.5)));
        assert_eq!(args.cargo_capacity, Some(dec!(600)));
        assert!(args.single_cargo);
        assert!(matches!(args.route_failure, Some(RouteFailureArg::Abort)));
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG));
    }

    #[test]
    fn parses_best_price() {
        let cli = Cli::try_parse_from([
            "tradelane",
            "--json",
            "best-price",
            "Tritanium",
            "--side",
            "sell",
            "--quantity",
            "10",
        ])
        .unwrap();

        assert!(cli.json);
        let Commands::BestPrice(args) = cli.command else {
            panic!("expected best-price");
        };
        assert_eq!(args.item, "Tritanium");
        assert_eq!(args.side, Side::Ask);
        assert_eq!(args.quantity, 10);
    }

    #[test]
    fn rejects_unknown_side() {
        let result = Cli::try_parse_from(["tradelane", "best-price", "Tritanium", "--side", "up"]);
        assert!(result.is_err());
    }
}
