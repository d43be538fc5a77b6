//! Projection statistics

use std::time::{Duration, Instant};

/// Counters collected while projecting one manifest
#[derive(Debug, Clone)]
pub struct ProjectionStats {
    /// Rules in the manifest
    pub rules: usize,
    /// Rules whose source matched a flattened path
    pub matched: usize,
    /// Rules whose source matched nothing
    pub unmatched: usize,
    /// Successful plain (first phase) insertions
    pub plain_insertions: usize,
    /// Successful query (second phase) insertions
    pub query_insertions: usize,
    /// Rules that failed to apply
    pub failures: usize,
    /// Processing start time
    pub start_time: Instant,
    elapsed: Option<Duration>,
}

impl ProjectionStats {
    /// Start collecting for a manifest of `rules` rules
    #[must_use]
    pub fn new(rules: usize) -> Self {
        Self {
            rules,
            matched: 0,
            unmatched: 0,
            plain_insertions: 0,
            query_insertions: 0,
            failures: 0,
            start_time: Instant::now(),
            elapsed: None,
        }
    }

    pub fn record_match(&mut self) {
        self.matched += 1;
    }

    pub fn record_unmatched(&mut self, count: usize) {
        self.unmatched += count;
    }

    pub fn record_plain(&mut self) {
        self.plain_insertions += 1;
    }

    pub fn record_query(&mut self) {
        self.query_insertions += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    /// Freeze the duration
    pub fn finish(&mut self) {
        self.elapsed = Some(self.start_time.elapsed());
    }

    /// Processing duration, frozen once [`finish`](Self::finish) has run
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.start_time.elapsed())
    }

    #[must_use]
    pub fn insertions(&self) -> usize {
        self.plain_insertions + self.query_insertions
    }
}
