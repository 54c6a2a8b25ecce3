//! Millisecond timestamps for cache entries.
//!
//! Timestamps are advisory: they are stored on every insert or overwrite and
//! handed back by lookups, but no eviction decision reads them.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch. Clocks set before the epoch read as 0.
pub fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
