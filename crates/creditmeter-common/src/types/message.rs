//! Messages sent during the billing period
//!
//! Messages are produced by the upstream message service and consumed once
//! per usage computation. They are never persisted here.

use serde::{Deserialize, Serialize};

/// A single message as returned by the message service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique within a batch
    pub id: i64,
    /// ISO-8601 timestamp, passed through untouched
    pub timestamp: String,
    /// Raw message text; may be empty
    pub text: String,
    /// Paid report attached to the message, if any
    #[serde(default)]
    pub report_id: Option<i64>,
}

impl Message {
    pub fn new(id: i64, timestamp: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            timestamp: timestamp.into(),
            text: text.into(),
            report_id: None,
        }
    }

    /// Attach a report to the message
    pub fn with_report(mut self, report_id: i64) -> Self {
        self.report_id = Some(report_id);
        self
    }
}

/// Envelope of the message service response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageBatch {
    pub messages: Vec<Message>,
}
