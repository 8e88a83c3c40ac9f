//! Per-message cost resolution

use crate::pricing::TextPricingEngine;
use crate::reports::ReportResolver;
use creditmeter_common::{Message, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How a message ended up priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMethod {
    /// Fixed price of the attached report
    Report,
    /// Text formula, either no report or the report was not found
    Text,
}

/// Credits for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCost {
    /// Set only when a paid report priced the message
    pub report_name: Option<String>,
    pub credits: f64,
    pub method: PricingMethod,
}

/// Chooses report pricing or text pricing for each message
#[derive(Clone)]
pub struct MessageCostResolver {
    reports: ReportResolver,
    text: TextPricingEngine,
}

impl MessageCostResolver {
    pub fn new(reports: ReportResolver, text: TextPricingEngine) -> Self {
        Self { reports, text }
    }

    /// Resolve the cost of a message.
    ///
    /// An unknown report falls back to text pricing; a failed report
    /// lookup is returned as an error, never priced by text.
    #[instrument(skip(self, message), fields(message_id = message.id, report_id = ?message.report_id))]
    pub async fn resolve(&self, message: &Message) -> Result<MessageCost> {
        if let Some(report_id) = message.report_id {
            if let Some(report) = self.reports.resolve(report_id).await? {
                debug!(report = %report.name, credits = report.credit_cost, "Priced by report");
                return Ok(MessageCost {
                    report_name: Some(report.name),
                    credits: report.credit_cost,
                    method: PricingMethod::Report,
                });
            }
        }

        let credits = self.text.price(&message.text);
        debug!(credits, "Priced by text");
        Ok(MessageCost {
            report_name: None,
            credits,
            method: PricingMethod::Text,
        })
    }

    pub fn reports(&self) -> &ReportResolver {
        &self.reports
    }

    pub fn text_engine(&self) -> &TextPricingEngine {
        &self.text
    }
}
