//! Matching behaviour over whole order stores.

use rust_decimal_macros::dec;
use tradelane::application::{match_opportunities, MatchConfig, Matcher};
use tradelane::domain::{Opportunity, OrderStore, SecurityTable};
use tradelane::port::NoopObserver;
use tradelane::testkit::domain::{ask, bid, security};

fn widget_config() -> MatchConfig {
    MatchConfig {
        min_margin: dec!(30),
        max_buy_price: dec!(200),
        min_revenue: dec!(1000),
        min_security: dec!(0.5),
    }
}

fn find(store: &OrderStore, locations: &SecurityTable, config: &MatchConfig) -> Vec<Opportunity> {
    match_opportunities(
        store,
        locations,
        config.min_margin,
        config.max_buy_price,
        config.min_revenue,
        config.min_security,
    )
}

fn widget_store() -> OrderStore {
    OrderStore::from_orders(vec![
        ask("Widget", dec!(100), 50, "A"),
        bid("Widget", dec!(150), 30, "B"),
    ])
}

fn widget_locations() -> SecurityTable {
    security(&[("A", dec!(0.8)), ("B", dec!(0.6))])
}

#[test]
fn widget_pair_is_reported_with_exact_values() {
    let found = find(&widget_store(), &widget_locations(), &widget_config());

    assert_eq!(found.len(), 1);
    let opportunity = &found[0];
    assert_eq!(opportunity.margin(), dec!(50));
    assert_eq!(opportunity.quantity(), 30);
    assert_eq!(opportunity.potential_revenue(), dec!(1500));
    assert_eq!(opportunity.unit_profit(), dec!(50));
    assert_eq!(opportunity.origin().location_name, "A");
    assert_eq!(opportunity.destination().location_name, "B");
    assert_eq!(opportunity.origin_security(), Some(dec!(0.8)));
    assert_eq!(opportunity.destination_security(), Some(dec!(0.6)));
}

#[test]
fn unsafe_destination_blocks_the_pair() {
    let config = MatchConfig {
        min_security: dec!(0.7),
        ..widget_config()
    };
    let found = find(&widget_store(), &widget_locations(), &config);
    assert!(found.is_empty());
}

#[test]
fn unknown_location_is_unsafe() {
    let locations = security(&[("A", dec!(0.8))]);
    let found = find(&widget_store(), &locations, &widget_config());
    assert!(found.is_empty());
}

#[test]
fn thresholds_are_inclusive() {
    // margin exactly 50% and revenue exactly 1500
    let config = MatchConfig {
        min_margin: dec!(50),
        min_revenue: dec!(1500),
        max_buy_price: dec!(100),
        ..widget_config()
    };
    let found = find(&widget_store(), &widget_locations(), &config);
    assert_eq!(found.len(), 1);

    let stricter_revenue = MatchConfig {
        min_revenue: dec!(1500.01),
        ..config
    };
    assert!(find(&widget_store(), &widget_locations(), &stricter_revenue).is_empty());

    let stricter_margin = MatchConfig {
        min_margin: dec!(50.0001),
        ..config
    };
    assert!(find(&widget_store(), &widget_locations(), &stricter_margin).is_empty());
}

#[test]
fn ask_above_purchase_cap_is_skipped() {
    let config = MatchConfig {
        max_buy_price: dec!(99.99),
        ..widget_config()
    };
    assert!(find(&widget_store(), &widget_locations(), &config).is_empty());
}

#[test]
fn no_pair_when_bid_does_not_beat_ask() {
    let store = OrderStore::from_orders(vec![
        ask("Widget", dec!(150), 50, "A"),
        bid("Widget", dec!(150), 30, "B"),
    ]);
    let config = MatchConfig {
        min_margin: dec!(0),
        min_revenue: dec!(0),
        ..widget_config()
    };
    assert!(find(&store, &widget_locations(), &config).is_empty());
}

#[test]
fn every_ask_bid_pair_is_considered() {
    let store = OrderStore::from_orders(vec![
        ask("Widget", dec!(100), 50, "A"),
        ask("Widget", dec!(110), 50, "A"),
        bid("Widget", dec!(150), 30, "B"),
        bid("Widget", dec!(160), 30, "B"),
        ask("Gadget", dec!(10), 5, "A"),
    ]);
    let outcome = Matcher::new(&widget_config(), &widget_locations()).run(&store, &NoopObserver);

    assert_eq!(outcome.opportunities.len(), 4);
    assert_eq!(outcome.pairs_compared, 4);
}

#[test]
fn matching_is_repeatable_and_parallel_agrees() {
    let store = OrderStore::from_orders(vec![
        ask("Widget", dec!(100), 50, "A"),
        bid("Widget", dec!(150), 30, "B"),
        ask("Gadget", dec!(20), 500, "A"),
        bid("Gadget", dec!(40), 100, "B"),
        ask("Sprocket", dec!(5), 1000, "B"),
        bid("Sprocket", dec!(9), 1000, "A"),
    ]);
    let config = widget_config();
    let locations = widget_locations();
    let matcher = Matcher::new(&config, &locations);

    let first = matcher.run(&store, &NoopObserver);
    let second = matcher.run(&store, &NoopObserver);
    let parallel = matcher.run_parallel(&store, &NoopObserver);

    assert_eq!(first.opportunities, second.opportunities);
    assert_eq!(first.opportunities, parallel.opportunities);
    assert_eq!(first.opportunities.len(), 3);
}

#[test]
fn single_item_matches_like_the_store() {
    let store = widget_store();
    let config = widget_config();
    let locations = widget_locations();
    let matcher = Matcher::new(&config, &locations);

    let book = store.by_name("Widget").unwrap();
    assert_eq!(
        matcher.match_item(book),
        matcher.run(&store, &NoopObserver).opportunities
    );
}
