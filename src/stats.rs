use lazy_static::lazy_static;
use metrics::{counter, gauge, Counter, Gauge};
use std::sync::atomic::{AtomicI64, Ordering};

lazy_static! {
    pub static ref GLOBAL_STATS: Stats = Stats::new();
}

pub struct Stats {
    pub extractor_creations: Counter,
    pub extractor_deletions: Counter,

    // Count of live extractors. The actual count is calculated with an atomic
    // since some metrics exporters don't supporting incrementing gauges (e.g. statsd)
    total_extractors_count: AtomicI64,
    total_extractors: Gauge,
}

impl Stats {
    pub fn new() -> Self {
        Self {
            extractor_creations: counter!("extractor.creations"),
            extractor_deletions: counter!("extractor.deletions"),
            total_extractors_count: AtomicI64::new(0),
            total_extractors: gauge!("extractor.total_count"),
        }
    }

    pub fn increment_total_extractors(&self) {
        self.update_total_extractors(1);
    }

    pub fn decrement_total_extractors(&self) {
        self.update_total_extractors(-1);
    }

    fn update_total_extractors(&self, delta: i64) {
        let prev_value = self.total_extractors_count.fetch_add(delta, Ordering::SeqCst);
        self.total_extractors.set((prev_value + delta) as f64);
    }
}
