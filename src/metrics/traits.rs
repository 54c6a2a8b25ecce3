//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and exporting are separate traits so the cache
//! logic only depends on the recorder side.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │
//!   │  get_hit/get_miss/insert    │
//!   │  evicted_entry              │
//!   └──────────────┬──────────────┘
//!                  │
//!                  ▼
//!   ┌─────────────────────────────┐
//!   │   WTinyLfuMetricsRecorder   │
//!   │  admission/rejection        │
//!   │  promotion/demotion/update  │
//!   └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Common counters for any cache.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evicted_entry(&mut self);
}

/// W-TinyLFU segment and admission signals.
pub trait WTinyLfuMetricsRecorder: CoreMetricsRecorder {
    fn record_peek_call(&mut self);
    fn record_update_hit(&mut self);
    fn record_update_miss(&mut self);
    /// The window pushed out an admission candidate.
    fn record_window_eviction(&mut self);
    /// Candidate admitted on frequency.
    fn record_admission(&mut self);
    /// Candidate admitted only because loading mode was on.
    fn record_loading_admission(&mut self);
    fn record_rejection(&mut self);
    fn record_promotion(&mut self);
    fn record_demotion(&mut self);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
