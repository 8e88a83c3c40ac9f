//! Pricing module
//!
//! Text-based message pricing:
//! - Tokenizer that keeps apostrophes and hyphens inside words
//! - Word pricing by length bucket, memoized per word
//! - Multi-factor text pricing engine with palindrome multiplier

pub mod cache;
pub mod engine;
pub mod tokenizer;
pub mod word;

pub use cache::{CacheStats, MemoCache};
pub use engine::{is_palindrome, TextPriceBreakdown, TextPricingEngine};
pub use tokenizer::tokenize;
pub use word::WordPricer;
