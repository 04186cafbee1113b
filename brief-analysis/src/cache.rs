//! Report cache.
//!
//! Keys on (tenant, case, content hash, analysis name). The content
//! hash covers every document's text and structured facts, so the key
//! self-invalidates whenever the bundle changes and stale reports are
//! never served. Entries are only ever superseded by a hash change or
//! evicted for capacity, never expired on time.

use std::sync::Arc;

use brief_core::hash::content_hash;
use brief_core::types::case::CaseContext;
use brief_core::types::report::StrategyReport;
use moka::sync::Cache;

const DEFAULT_CAPACITY: u64 = 1_024;

/// Cache key for one assessment of one case bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportKey {
    pub tenant: String,
    pub case_id: String,
    pub content_hash: u64,
    pub analysis: &'static str,
}

impl ReportKey {
    /// Key for the standard strategy assessment of this snapshot.
    pub fn strategy(tenant: &str, case_id: &str, ctx: &CaseContext) -> Self {
        Self {
            tenant: tenant.to_string(),
            case_id: case_id.to_string(),
            content_hash: content_hash(&ctx.documents),
            analysis: "strategy",
        }
    }
}

/// Shared, thread-safe cache of completed reports.
pub struct ReportCache {
    inner: Cache<ReportKey, Arc<StrategyReport>>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            inner: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn get(&self, key: &ReportKey) -> Option<Arc<StrategyReport>> {
        self.inner.get(key)
    }

    pub fn insert(&self, key: ReportKey, report: StrategyReport) {
        self.inner.insert(key, Arc::new(report));
    }

    /// Return the cached report or compute, store, and return it.
    /// Concurrent callers for the same key compute at most once.
    pub fn get_or_compute<F>(&self, key: ReportKey, compute: F) -> Arc<StrategyReport>
    where
        F: FnOnce() -> StrategyReport,
    {
        self.inner.get_with(key, || Arc::new(compute()))
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::AssessmentPipeline;
    use brief_core::types::case::{Document, PracticeArea};

    fn sample_context() -> CaseContext {
        let text = "Witness statement describing the disputed events in enough detail \
                    to clear the minimum extracted text requirement for assessment. \
                    The statement covers the timing, the location, and all of the \
                    parties who were involved in the incident under review.";
        CaseContext::new(vec![Document::from_text(text)], PracticeArea::General)
    }

    fn sample_report(ctx: &CaseContext) -> StrategyReport {
        AssessmentPipeline::new()
            .assess(ctx, 1)
            .as_report()
            .unwrap()
            .clone()
    }

    #[test]
    fn test_same_bundle_hits() {
        let cache = ReportCache::new();
        let ctx = sample_context();
        let key = ReportKey::strategy("tenant-a", "case-1", &ctx);
        cache.insert(key.clone(), sample_report(&ctx));
        assert!(cache.get(&key).is_some());
    }

    #[test]
    fn test_changed_bundle_misses() {
        let cache = ReportCache::new();
        let ctx = sample_context();
        let key = ReportKey::strategy("tenant-a", "case-1", &ctx);
        cache.insert(key.clone(), sample_report(&ctx));

        let mut changed = ctx.clone();
        changed.documents.push(Document::from_text("newly served exhibit"));
        let new_key = ReportKey::strategy("tenant-a", "case-1", &changed);
        assert_ne!(key, new_key);
        assert!(cache.get(&new_key).is_none());
    }

    #[test]
    fn test_tenants_are_isolated() {
        let ctx = sample_context();
        let a = ReportKey::strategy("tenant-a", "case-1", &ctx);
        let b = ReportKey::strategy("tenant-b", "case-1", &ctx);
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_or_compute_runs_once() {
        let cache = ReportCache::new();
        let ctx = sample_context();
        let key = ReportKey::strategy("tenant-a", "case-1", &ctx);
        let mut calls = 0;
        let first = cache.get_or_compute(key.clone(), || {
            calls += 1;
            sample_report(&ctx)
        });
        let second = cache.get_or_compute(key, || {
            calls += 1;
            sample_report(&ctx)
        });
        assert_eq!(calls, 1);
        assert_eq!(first.generated_at, second.generated_at);
    }
}
