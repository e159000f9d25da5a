//! Opportunity report writer.
//!
//! Rows are written with a fixed column order; optional stages that did not
//! run leave their columns empty rather than dropping them.

use std::fs::File;
use std::io;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::snapshot::QUOTE;
use crate::domain::{Opportunity, Price, Quantity, Security, Volume};
use crate::error::{Result, SnapshotError};

/// Decimal places kept for the margin column.
const MARGIN_DP: u32 = 4;

/// One report line. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub item_id: String,
    pub item: String,
    pub buy_in_region: String,
    pub buy_in_location_name: String,
    pub buy_in_location_id: String,
    pub sell_in_region: String,
    pub sell_in_location_name: String,
    pub sell_in_location_id: String,
    pub buy_price: Price,
    pub sell_price: Price,
    pub buy_min_volume: Quantity,
    pub sell_min_volume: Quantity,
    pub amount_available_to_buy: Quantity,
    pub amount_able_to_be_sold: Quantity,
    pub margin: Decimal,
    pub transactable_quantity: Quantity,
    pub potential_revenue: Price,
    pub buy_location_security: Option<Security>,
    pub sell_location_security: Option<Security>,
    pub item_volume: Option<Volume>,
    pub potential_revenue_per_cargo: Option<Price>,
    pub route: Option<String>,
    pub route_jumps: Option<usize>,
}

impl From<&Opportunity> for ReportRow {
    fn from(opportunity: &Opportunity) -> Self {
        let origin = opportunity.origin();
        let destination = opportunity.destination();
        Self {
            item_id: opportunity.item().id.to_string(),
            item: opportunity.item().name.clone(),
            buy_in_region: origin.region_name.clone(),
            buy_in_location_name: origin.location_name.clone(),
            buy_in_location_id: origin.site_id().to_string(),
            sell_in_region: destination.region_name.clone(),
            sell_in_location_name: destination.location_name.clone(),
            sell_in_location_id: destination.site_id().to_string(),
            buy_price: opportunity.buy_price(),
            sell_price: opportunity.sell_price(),
            buy_min_volume: opportunity.buy_min_quantity(),
            sell_min_volume: opportunity.sell_min_quantity(),
            amount_available_to_buy: opportunity.available_to_buy(),
            amount_able_to_be_sold: opportunity.able_to_sell(),
            margin: opportunity.margin().round_dp(MARGIN_DP).normalize(),
            transactable_quantity: opportunity.quantity(),
            potential_revenue: opportunity.potential_revenue(),
            buy_location_security: opportunity.origin_security(),
            sell_location_security: opportunity.destination_security(),
            item_volume: opportunity.item_volume(),
            potential_revenue_per_cargo: opportunity.revenue_per_cargo(),
            route: opportunity.route().map(ToString::to_string),
            route_jumps: opportunity.hop_count(),
        }
    }
}

/// Write `opportunities` as CSV to any writer.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub fn write_report<'a, W: io::Write>(
    writer: W,
    opportunities: impl IntoIterator<Item = &'a Opportunity>,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new().quote(QUOTE).from_writer(writer);
    let mut written = 0;
    for opportunity in opportunities {
        writer.serialize(ReportRow::from(opportunity))?;
        written += 1;
    }
    if written == 0 {
        // serialize() emits the header with the first row; an empty report
        // still gets one.
        writer.write_record(COLUMNS)?;
    }
    writer.flush()?;
    Ok(written)
}

/// Write the report CSV to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_report<'a>(
    path: &Path,
    opportunities: impl IntoIterator<Item = &'a Opportunity>,
) -> Result<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path).map_err(|source| SnapshotError::Write {
        path: path.display().to_string(),
        source,
    })?;
    let written = write_report(file, opportunities)?;
    info!(path = %path.display(), rows = written, "Wrote report");
    Ok(written)
}

/// Report columns, in order.
pub const COLUMNS: [&str; 23] = [
    "item_id",
    "item",
    "buy_in_region",
    "buy_in_location_name",
    "buy_in_location_id",
    "sell_in_region",
    "sell_in_location_name",
    "sell_in_location_id",
    "buy_price",
    "sell_price",
    "buy_min_volume",
    "sell_min_volume",
    "amount_available_to_buy",
    "amount_able_to_be_sold",
    "margin",
    "transactable_quantity",
    "potential_revenue",
    "buy_location_security",
    "sell_location_security",
    "item_volume",
    "potential_revenue_per_cargo",
    "route",
    "route_jumps",
];
