//! Handler for the `best-price` command.

use serde_json::json;

use super::command::BestPriceArgs;
use super::{config, output};
use crate::adapter::outbound::snapshot::load_orders;
use crate::domain::{best_price, PriceQuery, RegionFilter, Side};
use crate::error::Result;

/// Execute the best-price command.
///
/// Not finding a matching order is a normal outcome, reported as such.
pub fn execute(args: &BestPriceArgs) -> Result<()> {
    let config = config::load(&args.config)?;
    config
        .logging
        .with_verbosity(output::verbosity(), output::is_quiet())
        .init();

    let orders_path = args.orders.as_ref().unwrap_or(&config.input.orders);
    let orders = load_orders(orders_path, RegionFilter::All)?;

    let query = PriceQuery {
        item_name: &args.item,
        side: args.side,
        min_quantity: args.quantity,
        regions: RegionFilter::from_safe_regions(args.safe_regions || config.scan.safe_regions),
    };
    let best = best_price(&orders.store, &query);

    if output::is_json() {
        output::record(
            "best_price",
            json!({
                "item": args.item,
                "side": args.side.to_string(),
                "min_quantity": args.quantity,
                "order": best.map(|order| json!({
                    "price": order.price().to_string(),
                    "quantity_remaining": order.quantity_remaining(),
                    "min_quantity": order.min_quantity(),
                    "location_id": order.location_id().as_str(),
                    "location_name": order.location_name(),
                    "region_name": order.region_name(),
                })),
            }),
        );
        return Ok(());
    }

    let label = match args.side {
        Side::Bid => "Highest buy order",
        Side::Ask => "Lowest sell order",
    };
    output::section(&format!("{label} for {}", args.item));

    match best {
        Some(order) => {
            output::field("Price", output::positive(order.price()));
            output::field("Available", order.quantity_remaining());
            output::field("Min quantity", order.min_quantity());
            output::field(
                "Location",
                format!(
                    "{} {}",
                    order.location_name(),
                    output::muted(format!("({})", order.region_name()))
                ),
            );
        }
        None => {
            output::warning(&format!(
                "No {} order for {} with at least {} units",
                args.side, args.item, args.quantity
            ));
            if config.scan.safe_regions && !args.safe_regions {
                output::hint("safe_regions is enabled in the configuration file; orders outside safe regions were ignored");
            }
        }
    }
    Ok(())
}
