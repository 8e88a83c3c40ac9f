//! Caching report resolver

use crate::metrics::BillingMetrics;
use crate::pricing::cache::{CacheStats, MemoCache};
use async_trait::async_trait;
use creditmeter_common::{CreditError, Report, Result};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Outcome of a single upstream report lookup
#[derive(Debug, Clone, PartialEq)]
pub enum ReportLookup {
    Found(Report),
    /// The service does not know the id; the message falls back to text pricing
    NotFound,
    /// Anything else: error status, malformed payload, transport failure
    FetchFailed(String),
}

/// Upstream report service
#[async_trait]
pub trait ReportSource: Send + Sync {
    async fn lookup(&self, report_id: i64) -> ReportLookup;
}

/// Resolves report ids, caching found and not-found answers by id
#[derive(Clone)]
pub struct ReportResolver {
    source: Arc<dyn ReportSource>,
    cache: Arc<MemoCache<i64, Option<Report>>>,
    metrics: Option<Arc<BillingMetrics>>,
}

impl ReportResolver {
    pub fn new(source: Arc<dyn ReportSource>, cache: Arc<MemoCache<i64, Option<Report>>>) -> Self {
        Self {
            source,
            cache,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<BillingMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Resolve a report id.
    ///
    /// Returns `Ok(None)` when the report does not exist. Failed lookups
    /// are not cached, so the next call retries upstream.
    #[instrument(skip(self))]
    pub async fn resolve(&self, report_id: i64) -> Result<Option<Report>> {
        if let Some(cached) = self.cache.get(&report_id) {
            debug!(report_id, found = cached.is_some(), "Report cache hit");
            return Ok(cached);
        }

        debug!(report_id, "Report cache miss");
        if let Some(metrics) = &self.metrics {
            metrics.report_lookups.inc();
        }

        match self.source.lookup(report_id).await {
            ReportLookup::Found(report) => {
                self.cache.insert(report_id, Some(report.clone()));
                Ok(Some(report))
            }
            ReportLookup::NotFound => {
                warn!(report_id, "Report not found, falling back to text pricing");
                self.cache.insert(report_id, None);
                Ok(None)
            }
            ReportLookup::FetchFailed(reason) => {
                warn!(report_id, %reason, "Report lookup failed");
                Err(CreditError::report_fetch(report_id, reason))
            }
        }
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory report service that counts upstream calls
    #[derive(Default)]
    pub(crate) struct StubReportSource {
        responses: Mutex<HashMap<i64, Vec<ReportLookup>>>,
        pub(crate) calls: AtomicUsize,
    }

    impl StubReportSource {
        pub(crate) fn with(self, report_id: i64, lookup: ReportLookup) -> Self {
            self.responses
                .lock()
                .unwrap()
                .entry(report_id)
                .or_default()
                .push(lookup);
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReportSource for StubReportSource {
        async fn lookup(&self, report_id: i64) -> ReportLookup {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            match responses.get_mut(&report_id) {
                // Replay queued answers in order, repeating the last one
                Some(queue) if queue.len() > 1 => queue.remove(0),
                Some(queue) => queue[0].clone(),
                None => ReportLookup::NotFound,
            }
        }
    }

    fn resolver(source: Arc<StubReportSource>) -> ReportResolver {
        ReportResolver::new(source, Arc::new(MemoCache::new()))
    }

    #[tokio::test]
    async fn test_found_report_is_cached() {
        let source = Arc::new(
            StubReportSource::default()
                .with(1, ReportLookup::Found(Report::new(1, "Test Report", 10.0))),
        );
        let resolver = resolver(source.clone());

        let first = resolver.resolve(1).await.unwrap();
        let second = resolver.resolve(1).await.unwrap();

        assert_eq!(first, Some(Report::new(1, "Test Report", 10.0)));
        assert_eq!(first, second);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_not_found_is_cached_as_absent() {
        let source = Arc::new(StubReportSource::default().with(999, ReportLookup::NotFound));
        let resolver = resolver(source.clone());

        assert_eq!(resolver.resolve(999).await.unwrap(), None);
        assert_eq!(resolver.resolve(999).await.unwrap(), None);
        assert_eq!(source.calls(), 1);
        assert_eq!(resolver.cache_stats().entry_count, 1);
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let source = Arc::new(
            StubReportSource::default()
                .with(5, ReportLookup::FetchFailed("status 500".into()))
                .with(5, ReportLookup::Found(Report::new(5, "Recovered", 3.0))),
        );
        let resolver = resolver(source.clone());

        let err = resolver.resolve(5).await.unwrap_err();
        assert!(matches!(err, CreditError::ReportFetch { report_id: 5, .. }));
        assert_eq!(resolver.cache_stats().entry_count, 0);

        // Retried upstream on the next attempt
        let report = resolver.resolve(5).await.unwrap();
        assert_eq!(report.map(|r| r.name), Some("Recovered".to_string()));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_lookup() {
        let source = Arc::new(
            StubReportSource::default().with(2, ReportLookup::Found(Report::new(2, "R", 1.5))),
        );
        let resolver = resolver(source.clone());

        resolver.resolve(2).await.unwrap();
        resolver.clear_cache();
        resolver.resolve(2).await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_counts_upstream_lookups() {
        let metrics = Arc::new(BillingMetrics::new());
        let source = Arc::new(StubReportSource::default());
        let resolver = resolver(source).with_metrics(metrics.clone());

        resolver.resolve(1).await.unwrap();
        resolver.resolve(1).await.unwrap();
        resolver.resolve(2).await.unwrap();
        assert_eq!(metrics.report_lookups.get(), 2);
    }
}
