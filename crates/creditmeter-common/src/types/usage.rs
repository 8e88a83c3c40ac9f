//! Usage entries - credits consumed per message

use crate::{CreditError, Result};
use serde::{Deserialize, Serialize, Serializer};

/// Round a credit amount to 2 decimal places
pub fn round_credits(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn serialize_credits<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(round_credits(*value))
}

/// Credits consumed by a single message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub message_id: i64,
    pub timestamp: String,
    /// Present only when a paid report priced the message
    pub report_name: Option<String>,
    /// Always strictly positive
    #[serde(serialize_with = "serialize_credits")]
    pub credits_used: f64,
}

impl Usage {
    /// Build a usage entry, rejecting amounts that are not positive once
    /// rounded to 2 decimals
    pub fn new(
        message_id: i64,
        timestamp: impl Into<String>,
        report_name: Option<String>,
        credits_used: f64,
    ) -> Result<Self> {
        if !credits_used.is_finite() || round_credits(credits_used) <= 0.0 {
            return Err(CreditError::Validation(format!(
                "credits_used must be greater than 0 for message {}, got {}",
                message_id, credits_used
            )));
        }

        Ok(Self {
            message_id,
            timestamp: timestamp.into(),
            report_name,
            credits_used,
        })
    }
}

/// Body of the usage endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageResponse {
    pub usage: Vec<Usage>,
}

impl UsageResponse {
    pub fn new(usage: Vec<Usage>) -> Self {
        Self { usage }
    }

    /// Sum of credits across all entries
    pub fn total_credits(&self) -> f64 {
        round_credits(self.usage.iter().map(|u| u.credits_used).sum())
    }
}
