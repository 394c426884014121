use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use time::OffsetDateTime;

use crate::summarize::SummarizeResult;

/// Server-wide counters. The summarizer itself keeps no state between calls.
#[derive(Debug)]
pub struct ServerMetrics {
    pub requests: AtomicU64,
    pub fallbacks: AtomicU64,
    /// Requests refused for bad parameters
    pub rejected: AtomicU64,
    /// Requests that timed out or whose worker died
    pub failed: AtomicU64,
    pub sentences_in: AtomicU64,
    pub sentences_out: AtomicU64,
    started_at: OffsetDateTime,
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self {
            requests: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            sentences_in: AtomicU64::new(0),
            sentences_out: AtomicU64::new(0),
            started_at: OffsetDateTime::now_utc(),
        }
    }
}

impl ServerMetrics {
    pub fn record(&self, result: &SummarizeResult) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        if result.fallback {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
        }
        self.sentences_in
            .fetch_add(result.sentences_total as u64, Ordering::Relaxed);
        self.sentences_out
            .fetch_add(result.sentences_selected as u64, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            sentences_in: self.sentences_in.load(Ordering::Relaxed),
            sentences_out: self.sentences_out.load(Ordering::Relaxed),
            started_at: self.started_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub fallbacks: u64,
    pub rejected: u64,
    pub failed: u64,
    pub sentences_in: u64,
    pub sentences_out: u64,
    pub started_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(selected: usize, total: usize, fallback: bool) -> SummarizeResult {
        SummarizeResult {
            summary: String::new(),
            sentences_selected: selected,
            sentences_total: total,
            fallback,
        }
    }

    #[test]
    fn counts_requests_fallbacks_rejections_and_failures() {
        let m = ServerMetrics::default();
        m.record(&result(2, 5, false));
        m.record(&result(1, 1, true));
        m.record_rejected();
        m.record_failed();
        let snap = m.snapshot();
        assert_eq!(snap.requests, 4);
        assert_eq!(snap.fallbacks, 1);
        assert_eq!(snap.rejected, 1);
        assert_eq!(snap.failed, 1);
        assert_eq!(snap.sentences_in, 6);
        assert_eq!(snap.sentences_out, 3);
    }
}
