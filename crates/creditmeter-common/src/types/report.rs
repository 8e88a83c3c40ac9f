//! Reports - pre-priced named operations
//!
//! A message that references a report is billed the report's fixed
//! `credit_cost` instead of being priced by its text.

use crate::{CreditError, Result};
use serde::{Deserialize, Serialize};

/// A report as returned by the report service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub name: String,
    /// Fixed price in credits (non-negative)
    pub credit_cost: f64,
}

impl Report {
    pub fn new(id: i64, name: impl Into<String>, credit_cost: f64) -> Self {
        Self {
            id,
            name: name.into(),
            credit_cost,
        }
    }

    /// Check the invariants the report service is expected to uphold
    pub fn validate(&self) -> Result<()> {
        if !self.credit_cost.is_finite() || self.credit_cost < 0.0 {
            return Err(CreditError::Validation(format!(
                "report {} has invalid credit_cost {}",
                self.id, self.credit_cost
            )));
        }
        Ok(())
    }
}
