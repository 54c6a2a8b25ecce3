/// Point-in-time copy of W-TinyLFU counters, for one shard or summed over a cache.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WTinyLfuMetricsSnapshot {
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
    pub loading_admissions: u64, // admitted only because loading mode was on
    pub rejections: u64,

    pub promotions: u64, // probation -> protection
    pub demotions: u64,  // protection -> probation
    pub evicted_entries: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl WTinyLfuMetricsSnapshot {
    /// Adds `other`'s counters and gauges to `self`.
    pub fn merge(mut self, other: &Self) -> Self {
        self.get_calls += other.get_calls;
        self.get_hits += other.get_hits;
        self.get_misses += other.get_misses;
        self.peek_calls += other.peek_calls;
        self.insert_calls += other.insert_calls;
        self.insert_updates += other.insert_updates;
        self.insert_new += other.insert_new;
        self.update_hits += other.update_hits;
        self.update_misses += other.update_misses;
        self.window_evictions += other.window_evictions;
        self.admissions += other.admissions;
        self.loading_admissions += other.loading_admissions;
        self.rejections += other.rejections;
        self.promotions += other.promotions;
        self.demotions += other.demotions;
        self.evicted_entries += other.evicted_entries;
        self.cache_len += other.cache_len;
        self.capacity += other.capacity;
        self
    }

    /// Fraction of lookups that hit, or 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
