//! Usage computation
//!
//! Fetches the billing period's messages and prices each one, either by
//! its attached report or by its text.

pub mod aggregator;
pub mod cost;

pub use aggregator::{MessageSource, UsageAggregator};
pub use cost::{MessageCost, MessageCostResolver, PricingMethod};
