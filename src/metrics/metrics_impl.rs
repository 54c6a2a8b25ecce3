use crate::metrics::snapshot::WTinyLfuMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsRecorder, WTinyLfuMetricsRecorder};

/// Per-shard counters, mutated under the shard lock.
#[derive(Debug, Default, Clone)]
pub struct WTinyLfuMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub peek_calls: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub update_hits: u64,
    pub update_misses: u64,
    pub window_evictions: u64,
    pub admissions: u64,
    pub loading_admissions: u64,
    pub rejections: u64,
    pub promotions: u64,
    pub demotions: u64,
    pub evicted_entries: u64,
}

impl WTinyLfuMetrics {
    /// Copies the counters and attaches the given gauges.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> WTinyLfuMetricsSnapshot {
        WTinyLfuMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            peek_calls: self.peek_calls,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            update_hits: self.update_hits,
            update_misses: self.update_misses,
            window_evictions: self.window_evictions,
            admissions: self.admissions,
            loading_admissions: self.loading_admissions,
            rejections: self.rejections,
            promotions: self.promotions,
            demotions: self.demotions,
            evicted_entries: self.evicted_entries,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for WTinyLfuMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
}

impl WTinyLfuMetricsRecorder for WTinyLfuMetrics {
    fn record_peek_call(&mut self) {
        self.peek_calls += 1;
    }

    fn record_update_hit(&mut self) {
        self.update_hits += 1;
    }

    fn record_update_miss(&mut self) {
        self.update_misses += 1;
    }

    fn record_window_eviction(&mut self) {
        self.window_evictions += 1;
    }

    fn record_admission(&mut self) {
        self.admissions += 1;
    }

    fn record_loading_admission(&mut self) {
        self.loading_admissions += 1;
    }

    fn record_rejection(&mut self) {
        self.rejections += 1;
    }

    fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    fn record_demotion(&mut self) {
        self.demotions += 1;
    }
}
