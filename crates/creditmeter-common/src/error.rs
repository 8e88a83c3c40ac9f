//! Error types for Creditmeter
//!
//! Every variant is fatal to the request that raised it. A report that is
//! simply unknown upstream is not an error; see `ReportLookup::NotFound`
//! in the billing crate.

use thiserror::Error;

/// Result type alias using CreditError
pub type Result<T> = std::result::Result<T, CreditError>;

/// Unified error type for Creditmeter operations
#[derive(Debug, Error)]
pub enum CreditError {
    /// The message batch could not be fetched
    #[error("Error fetching message data")]
    MessageSource { reason: String },

    /// A report lookup failed for a reason other than "not found"
    #[error("Error fetching report data")]
    ReportFetch { report_id: i64, reason: String },

    /// An upstream payload or derived record failed validation
    #[error("Invalid upstream payload: {0}")]
    Validation(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CreditError {
    pub fn message_source(reason: impl Into<String>) -> Self {
        CreditError::MessageSource {
            reason: reason.into(),
        }
    }

    pub fn report_fetch(report_id: i64, reason: impl Into<String>) -> Self {
        CreditError::ReportFetch {
            report_id,
            reason: reason.into(),
        }
    }

    /// Underlying cause, for logs only
    pub fn reason(&self) -> &str {
        match self {
            CreditError::MessageSource { reason } => reason,
            CreditError::ReportFetch { reason, .. } => reason,
            CreditError::Validation(msg)
            | CreditError::Config(msg)
            | CreditError::Internal(msg) => msg,
        }
    }
}

impl From<serde_json::Error> for CreditError {
    fn from(err: serde_json::Error) -> Self {
        CreditError::Validation(err.to_string())
    }
}
