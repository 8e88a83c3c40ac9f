//! Prometheus metrics for usage billing

use prometheus::{Counter, IntCounter, IntCounterVec, Opts, Registry};

/// How a message was priced
pub const METHOD_REPORT: &str = "report";
pub const METHOD_TEXT: &str = "text";

/// Prometheus metrics for the billing pipeline
pub struct BillingMetrics {
    pub usage_requests: IntCounter,
    pub usage_failures: IntCounter,
    pub messages_priced: IntCounterVec,
    pub report_lookups: IntCounter,
    pub credits: Counter,
}

impl BillingMetrics {
    pub fn new() -> Self {
        Self {
            usage_requests: IntCounter::new(
                "creditmeter_usage_requests_total",
                "Total usage computations started",
            )
            .expect("valid metric"),
            usage_failures: IntCounter::new(
                "creditmeter_usage_failures_total",
                "Usage computations aborted by a fatal error",
            )
            .expect("valid metric"),
            messages_priced: IntCounterVec::new(
                Opts::new(
                    "creditmeter_messages_priced_total",
                    "Messages priced, by pricing method",
                ),
                &["method"],
            )
            .expect("valid metric"),
            report_lookups: IntCounter::new(
                "creditmeter_report_lookups_total",
                "Report lookups sent upstream (cache misses)",
            )
            .expect("valid metric"),
            credits: Counter::new(
                "creditmeter_credits_total",
                "Credits attributed across all usage computations",
            )
            .expect("valid metric"),
        }
    }

    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.usage_requests.clone()))?;
        registry.register(Box::new(self.usage_failures.clone()))?;
        registry.register(Box::new(self.messages_priced.clone()))?;
        registry.register(Box::new(self.report_lookups.clone()))?;
        registry.register(Box::new(self.credits.clone()))?;
        Ok(())
    }

    pub(crate) fn record_priced(&self, method: &str, credits: f64) {
        self.messages_priced.with_label_values(&[method]).inc();
        self.credits.inc_by(credits);
    }
}

impl Default for BillingMetrics {
    fn default() -> Self {
        Self::new()
    }
}
