//! Optional operation counters (enabled with the `metrics` feature).
//!
//! Each shard owns a [`WTinyLfuMetrics`](metrics_impl::WTinyLfuMetrics)
//! recorder that is only touched while the shard lock is held, so counters are
//! plain `u64`s. [`WTinyLfuCache::metrics_snapshot`](crate::WTinyLfuCache::metrics_snapshot)
//! sums the shards into one [`WTinyLfuMetricsSnapshot`](snapshot::WTinyLfuMetricsSnapshot),
//! which can be published with a [`MetricsExporter`](traits::MetricsExporter).

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
