//! # Creditmeter Billing
//!
//! Computes how many credits each message of the current billing period
//! consumed.
//!
//! ## Pricing
//!
//! A message that references a known report costs the report's fixed
//! `credit_cost`. Every other message is priced from its text:
//!
//! ```text
//! subtotal = 1.0                       base
//!          + 0.05 × characters
//!          + Σ word price              0.1 / 0.2 / 0.3 by length
//!          - 2.0 if no word repeats
//!          + 0.3 × vowels at positions 3, 6, 9, ...
//!          + 5.0 if longer than 100 characters
//! total    = subtotal × 2 if palindrome
//! credits  = round(max(total, 1.0), 2)
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! UsageAggregator ──► MessageSource ──► [Message]
//!        │
//!        └─► MessageCostResolver ─┬─► ReportResolver ──► ReportSource
//!                                 └─► TextPricingEngine
//! ```

pub mod metrics;
pub mod pricing;
pub mod reports;
pub mod sources;
pub mod usage;

pub use metrics::BillingMetrics;
pub use pricing::{MemoCache, TextPriceBreakdown, TextPricingEngine, WordPricer};
pub use reports::{ReportLookup, ReportResolver, ReportSource};
pub use sources::{HttpMessageSource, HttpReportSource};
pub use usage::{MessageCost, MessageCostResolver, MessageSource, PricingMethod, UsageAggregator};

use creditmeter_common::Report;
use std::sync::Arc;

/// Caches shared by every usage computation in the process
#[derive(Clone, Default)]
pub struct BillingCaches {
    pub words: Arc<MemoCache<String, f64>>,
    pub reports: Arc<MemoCache<i64, Option<Report>>>,
}

impl BillingCaches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached word price and report
    pub fn clear(&self) {
        self.words.clear();
        self.reports.clear();
    }
}

/// Wire an aggregator from its sources and shared caches
pub fn usage_aggregator(
    messages: Arc<dyn MessageSource>,
    reports: Arc<dyn ReportSource>,
    caches: &BillingCaches,
    metrics: Option<Arc<BillingMetrics>>,
) -> UsageAggregator {
    let mut resolver = ReportResolver::new(reports, caches.reports.clone());
    if let Some(metrics) = &metrics {
        resolver = resolver.with_metrics(metrics.clone());
    }

    let text = TextPricingEngine::new(WordPricer::new(caches.words.clone()));
    let aggregator = UsageAggregator::new(messages, MessageCostResolver::new(resolver, text));

    match metrics {
        Some(metrics) => aggregator.with_metrics(metrics),
        None => aggregator,
    }
}
