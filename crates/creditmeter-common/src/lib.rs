//! # Creditmeter Common
//!
//! Shared types, errors, and pricing constants for Creditmeter.
//!
//! ## Core Types
//!
//! - [`Message`]: a message sent during the billing period
//! - [`Report`]: a pre-priced named report a message may reference
//! - [`Usage`]: credits consumed by one message
//! - [`UsageResponse`]: the body returned by the usage endpoint

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{CreditError, Result};
pub use types::{
    message::{Message, MessageBatch},
    report::Report,
    usage::{round_credits, Usage, UsageResponse},
};

/// Creditmeter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Credits charged for every message before any other rule
pub const BASE_COST: f64 = 1.0;

/// Credits per character of raw message text
pub const CHARACTER_COST: f64 = 0.05;

/// Word price for words of up to 3 characters
pub const SHORT_WORD_COST: f64 = 0.1;

/// Word price for words of 4 to 7 characters
pub const MEDIUM_WORD_COST: f64 = 0.2;

/// Word price for words longer than 7 characters
pub const LONG_WORD_COST: f64 = 0.3;

/// Bonus (negative cost) when no word is repeated
pub const UNIQUE_WORDS_BONUS: f64 = -2.0;

/// Credits per vowel at a 1-indexed position divisible by 3
pub const THIRD_VOWEL_COST: f64 = 0.3;

/// Messages longer than this many characters pay the length penalty
pub const LENGTH_PENALTY_THRESHOLD: usize = 100;

/// Flat penalty for long messages
pub const LENGTH_PENALTY: f64 = 5.0;

/// Multiplier applied to the subtotal of palindromic messages
pub const PALINDROME_MULTIPLIER: f64 = 2.0;

/// No message is ever billed below this
pub const MINIMUM_CREDITS: f64 = 1.0;

/// Default upstream for the current period's messages
pub const DEFAULT_MESSAGES_API_URL: &str =
    "https://owpublic.blob.core.windows.net/tech-task/messages/current-period";

/// Default upstream for report lookups; `{id}` is replaced by the report id
pub const DEFAULT_REPORT_API_URL_TEMPLATE: &str =
    "https://owpublic.blob.core.windows.net/tech-task/reports/{id}";

/// Default cross-origin allow-list (the usage dashboard dev server)
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";
