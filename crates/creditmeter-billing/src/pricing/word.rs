//! Per-word pricing by length bucket

use super::cache::{CacheStats, MemoCache};
use creditmeter_common::{LONG_WORD_COST, MEDIUM_WORD_COST, SHORT_WORD_COST};
use std::sync::Arc;

/// Prices single words, memoized per distinct word
#[derive(Clone)]
pub struct WordPricer {
    cache: Arc<MemoCache<String, f64>>,
}

impl WordPricer {
    pub fn new(cache: Arc<MemoCache<String, f64>>) -> Self {
        Self { cache }
    }

    /// Price a word: up to 3 characters, 4 to 7, or longer
    pub fn price(&self, word: &str) -> f64 {
        if let Some(price) = self.cache.get(word) {
            return price;
        }

        let price = Self::price_for_length(word.chars().count());
        self.cache.insert(word.to_string(), price);
        price
    }

    fn price_for_length(length: usize) -> f64 {
        match length {
            0..=3 => SHORT_WORD_COST,
            4..=7 => MEDIUM_WORD_COST,
            _ => LONG_WORD_COST,
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for WordPricer {
    fn default() -> Self {
        Self::new(Arc::new(MemoCache::new()))
    }
}
