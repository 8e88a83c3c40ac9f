//! Text pricing engine
//!
//! Prices a message from its text when no paid report is attached:
//!
//! ```text
//! subtotal = base + characters + words + unique bonus + third vowels + length penalty
//! total    = subtotal × 2 if palindrome
//! credits  = round(max(total, 1.0), 2)
//! ```
//!
//! The palindrome multiplier applies to the whole running subtotal, and
//! the 1.0 floor applies after it.

use super::tokenizer::tokenize;
use super::word::WordPricer;
use creditmeter_common::{
    round_credits, BASE_COST, CHARACTER_COST, LENGTH_PENALTY, LENGTH_PENALTY_THRESHOLD,
    MINIMUM_CREDITS, PALINDROME_MULTIPLIER, THIRD_VOWEL_COST, UNIQUE_WORDS_BONUS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::trace;

/// Every term of the text formula for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPriceBreakdown {
    pub base: f64,
    pub character_cost: f64,
    pub word_cost: f64,
    pub unique_bonus: f64,
    pub third_vowel_cost: f64,
    pub length_penalty: f64,
    /// Sum of the terms above
    pub subtotal: f64,
    pub palindrome: bool,
    /// Final credits, floored and rounded to 2 decimals
    pub total: f64,
}

/// Stateless apart from the word price cache
#[derive(Clone, Default)]
pub struct TextPricingEngine {
    words: WordPricer,
}

impl TextPricingEngine {
    pub fn new(words: WordPricer) -> Self {
        Self { words }
    }

    /// Credits consumed by a message priced from its text
    pub fn price(&self, text: &str) -> f64 {
        self.breakdown(text).total
    }

    /// Price a message, keeping every intermediate term
    pub fn breakdown(&self, text: &str) -> TextPriceBreakdown {
        let length = text.chars().count();
        let words = tokenize(text);

        let base = BASE_COST;
        let character_cost = length as f64 * CHARACTER_COST;
        let word_cost: f64 = words.iter().map(|w| self.words.price(w)).sum();
        let unique_bonus = if all_unique(&words) {
            UNIQUE_WORDS_BONUS
        } else {
            0.0
        };
        let third_vowel_cost = THIRD_VOWEL_COST * third_position_vowels(text) as f64;
        let length_penalty = if length > LENGTH_PENALTY_THRESHOLD {
            LENGTH_PENALTY
        } else {
            0.0
        };

        let subtotal =
            base + character_cost + word_cost + unique_bonus + third_vowel_cost + length_penalty;

        let palindrome = is_palindrome(text);
        let total = if palindrome {
            subtotal * PALINDROME_MULTIPLIER
        } else {
            subtotal
        };
        let total = round_credits(total.max(MINIMUM_CREDITS));

        trace!(length, words = words.len(), subtotal, palindrome, total, "Priced text");

        TextPriceBreakdown {
            base,
            character_cost,
            word_cost,
            unique_bonus,
            third_vowel_cost,
            length_penalty,
            subtotal,
            palindrome,
            total,
        }
    }

    pub fn word_pricer(&self) -> &WordPricer {
        &self.words
    }
}

/// An empty word list counts as all unique
fn all_unique(words: &[String]) -> bool {
    let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
    distinct.len() == words.len()
}

/// Vowels at 1-indexed positions 3, 6, 9, ... of the raw text
fn third_position_vowels(text: &str) -> usize {
    text.chars()
        .enumerate()
        .filter(|(i, c)| {
            (i + 1) % 3 == 0 && matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
        })
        .count()
}

/// Case- and punctuation-insensitive; empty after stripping is a palindrome
pub fn is_palindrome(text: &str) -> bool {
    let sanitized: Vec<char> = text
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    sanitized.iter().eq(sanitized.iter().rev())
}
