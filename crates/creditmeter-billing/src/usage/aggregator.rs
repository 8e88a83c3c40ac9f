//! Usage aggregation for the current billing period

use super::cost::{MessageCostResolver, PricingMethod};
use crate::metrics::{BillingMetrics, METHOD_REPORT, METHOD_TEXT};
use async_trait::async_trait;
use creditmeter_common::{Message, Result, Usage, UsageResponse};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Upstream message service
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// All messages of the current billing period, in service order
    async fn fetch_messages(&self) -> Result<Vec<Message>>;
}

/// Builds the usage list for one request
#[derive(Clone)]
pub struct UsageAggregator {
    messages: Arc<dyn MessageSource>,
    costs: MessageCostResolver,
    metrics: Option<Arc<BillingMetrics>>,
}

impl UsageAggregator {
    pub fn new(messages: Arc<dyn MessageSource>, costs: MessageCostResolver) -> Self {
        Self {
            messages,
            costs,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<BillingMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// One usage entry per message, in input order.
    ///
    /// Any error (message fetch, report fetch, invalid usage) aborts the
    /// whole batch; no partial list is ever returned. Priced-message
    /// metrics are recorded only once the whole batch has succeeded.
    #[instrument(skip(self))]
    pub async fn compute_usage(&self) -> Result<UsageResponse> {
        if let Some(metrics) = &self.metrics {
            metrics.usage_requests.inc();
        }

        let result = self.collect().await;
        match &result {
            Ok(response) => info!(
                messages = response.usage.len(),
                total_credits = response.total_credits(),
                "Computed usage"
            ),
            Err(e) => {
                error!(error = %e, reason = e.reason(), "Usage computation failed");
                if let Some(metrics) = &self.metrics {
                    metrics.usage_failures.inc();
                }
            }
        }
        result
    }

    async fn collect(&self) -> Result<UsageResponse> {
        let messages = self.messages.fetch_messages().await?;
        let mut usage = Vec::with_capacity(messages.len());
        let mut methods = Vec::with_capacity(messages.len());

        for message in messages {
            let cost = self.costs.resolve(&message).await?;
            methods.push(cost.method);
            usage.push(Usage::new(
                message.id,
                message.timestamp,
                cost.report_name,
                cost.credits,
            )?);
        }

        if let Some(metrics) = &self.metrics {
            for (entry, method) in usage.iter().zip(methods) {
                let method = match method {
                    PricingMethod::Report => METHOD_REPORT,
                    PricingMethod::Text => METHOD_TEXT,
                };
                metrics.record_priced(method, entry.credits_used);
            }
        }

        Ok(UsageResponse::new(usage))
    }

    pub fn cost_resolver(&self) -> &MessageCostResolver {
        &self.costs
    }
}
