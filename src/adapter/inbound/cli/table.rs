//! Summary table of the best opportunities.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::Opportunity;

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Buy in")]
    buy_in: String,
    #[tabled(rename = "Sell in")]
    sell_in: String,
    #[tabled(rename = "Buy")]
    buy_price: String,
    #[tabled(rename = "Sell")]
    sell_price: String,
    #[tabled(rename = "Margin %")]
    margin: String,
    #[tabled(rename = "Qty")]
    quantity: u64,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Per cargo")]
    per_cargo: String,
    #[tabled(rename = "Jumps")]
    jumps: String,
}

impl From<&Opportunity> for OpportunityRow {
    fn from(opportunity: &Opportunity) -> Self {
        Self {
            item: opportunity.item().name.clone(),
            buy_in: opportunity.origin().location_name.clone(),
            sell_in: opportunity.destination().location_name.clone(),
            buy_price: opportunity.buy_price().to_string(),
            sell_price: opportunity.sell_price().to_string(),
            margin: opportunity.margin().round_dp(1).to_string(),
            quantity: opportunity.quantity(),
            revenue: opportunity.potential_revenue().round_dp(0).to_string(),
            per_cargo: opportunity
                .revenue_per_cargo()
                .map_or_else(|| "-".to_string(), |r| r.round_dp(0).to_string()),
            jumps: opportunity
                .hop_count()
                .map_or_else(|| "-".to_string(), |n| n.to_string()),
        }
    }
}

/// Render the first `limit` opportunities as a table.
pub fn render<'a>(opportunities: impl IntoIterator<Item = &'a Opportunity>, limit: usize) -> String {
    let rows: Vec<OpportunityRow> = opportunities
        .into_iter()
        .take(limit)
        .map(OpportunityRow::from)
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Item, Order, Place, Side};
    use rust_decimal_macros::dec;

    #[test]
    fn renders_limited_rows() {
        let item = Item::new("34", "Tritanium");
        let ask = Order::try_new(
            item.clone(),
            Side::Ask,
            dec!(4),
            1000,
            1,
            Place::new("1", "Jita", "1", "The Forge"),
        )
        .unwrap();
        let bid = Order::try_new(
            item,
            Side::Bid,
            dec!(6),
            1000,
            1,
            Place::new("2", "Amarr", "2", "Domain"),
        )
        .unwrap();
        let opportunity = Opportunity::builder().ask(&ask).bid(&bid).build().unwrap();
        let many = vec![opportunity.clone(), opportunity.clone(), opportunity];

        let text = render(&many, 2);
        assert!(text.contains("Tritanium"));
        assert!(text.contains("Margin %"));
        assert_eq!(text.matches("Tritanium").count(), 2);
    }
}
