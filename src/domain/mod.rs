//! Market-agnostic domain types.
//!
//! Everything here is plain data plus pure functions: orders, the
//! item-indexed order store, location safety, opportunities and routes.

pub mod best_price;
pub mod error;
pub mod id;
pub mod location;
pub mod money;
pub mod opportunity;
pub mod order;
pub mod orderbook;
pub mod route;

pub use best_price::{best_price, PriceQuery};
pub use id::{ItemId, LocationId, RawId, RegionId};
pub use location::{
    is_safe_region, qualifies, LocationQualifier, RegionFilter, SecurityTable, SAFE_REGIONS,
};
pub use money::{margin_percent, revenue, Price, Quantity, Security, Volume};
pub use opportunity::{Opportunity, OpportunityBuildError, OpportunityBuilder};
pub use order::{Item, Order, Place, Side};
pub use orderbook::{ItemBook, OrderStore};
pub use route::Route;
