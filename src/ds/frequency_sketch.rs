//! TinyLFU frequency sketch.
//!
//! A count-min sketch of saturating 8-bit counters: six rows, each addressed
//! by a different string hash of the key modulo the row width. A key's
//! estimated frequency is the minimum of its six counters, which can only
//! overestimate (through collisions) and never underestimate.
//!
//! ```text
//!   key ──► rs   ──► row 0 [ 0 | 3 | 0 | 1 | ... ]
//!       ──► js   ──► row 1 [ 2 | 0 | 0 | 3 | ... ]
//!       ──► bkdr ──► row 2 [ 0 | 0 | 3 | 0 | ... ]
//!       ──► sdbm ──► row 3 [ ... ]
//!       ──► djb  ──► row 4 [ ... ]
//!       ──► ap   ──► row 5 [ ... ]
//!
//!   estimate(key) = min(row_i[h_i(key) % width])
//! ```
//!
//! ## Aging
//!
//! Counters only saturate upwards; nothing in the cache ages them. Without
//! periodic [`FrequencySketch::decay`] calls from the embedding application,
//! long-lived sketches drift towards admitting every key.

use crate::hash::{SKETCH_FAMILIES, sketch_hashes};

/// Number of counter rows.
pub const HASH_FAMILIES: usize = SKETCH_FAMILIES;

/// Counter saturation value.
pub const MAX_COUNT: u8 = u8::MAX;

/// A key is admitted when its estimate is strictly greater than this.
pub const ADMISSION_THRESHOLD: u8 = 1;

/// Approximate, saturating frequency counter over string keys.
#[derive(Debug, Clone)]
pub struct FrequencySketch {
    width: usize,
    rows: [Box<[u8]>; HASH_FAMILIES],
}

impl FrequencySketch {
    /// Creates a sketch with `width` counters per row (at least 1).
    pub fn new(width: usize) -> Self {
        let width = width.max(1);
        Self {
            width,
            rows: std::array::from_fn(|_| vec![0u8; width].into_boxed_slice()),
        }
    }

    /// Counters per row.
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn slots(&self, key: &str) -> [usize; HASH_FAMILIES] {
        sketch_hashes(key.as_bytes()).map(|hash| hash as usize % self.width)
    }

    /// Counts one occurrence of `key`. Saturated counters stay at [`MAX_COUNT`].
    pub fn record(&mut self, key: &str) {
        let slots = self.slots(key);
        for (row, slot) in self.rows.iter_mut().zip(slots) {
            row[slot] = row[slot].saturating_add(1);
        }
    }

    /// Minimum counter across all rows for `key`.
    pub fn estimate(&self, key: &str) -> u8 {
        let slots = self.slots(key);
        self.rows
            .iter()
            .zip(slots)
            .fold(MAX_COUNT, |min, (row, slot)| min.min(row[slot]))
    }

    /// Whether `key` has been seen often enough to enter the main region.
    pub fn admit(&self, key: &str) -> bool {
        self.estimate(key) > ADMISSION_THRESHOLD
    }

    /// Subtracts the current estimate of `key` from each of its counters,
    /// flooring at zero. Colliding keys lose at most the same amount.
    pub fn decay(&mut self, key: &str) {
        let decrement = self.estimate(key);
        if decrement == 0 {
            return;
        }
        let slots = self.slots(key);
        for (row, slot) in self.rows.iter_mut().zip(slots) {
            row[slot] = row[slot].saturating_sub(decrement);
        }
    }

    /// Zeroes every counter.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(0);
        }
    }

    /// Approximate heap footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + HASH_FAMILIES * self.width
    }
}


#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        /// Property: estimate never decreases under record
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_estimate_monotonic(
            width in 1usize..256,
            keys in prop::collection::vec("[a-z]{1,8}", 1..20),
            rounds in 1usize..300
        ) {
            let mut sketch = FrequencySketch::new(width);
            let target = keys[0].clone();
            let mut last = sketch.estimate(&target);
            for i in 0..rounds {
                sketch.record(&keys[i % keys.len()]);
                let now = sketch.estimate(&target);
                prop_assert!(now >= last);
                last = now;
            }
        }

        /// Property: estimate is never below the true count (capped at 255)
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_estimate_never_underestimates(
            width in 1usize..64,
            keys in prop::collection::vec("[a-z]{1,4}", 1..200)
        ) {
            let mut sketch = FrequencySketch::new(width);
            let mut truth = std::collections::HashMap::new();
            for key in &keys {
                sketch.record(key);
                *truth.entry(key.clone()).or_insert(0usize) += 1;
            }
            for (key, count) in truth {
                prop_assert!(usize::from(sketch.estimate(&key)) >= count.min(255));
            }
        }
    }
}
