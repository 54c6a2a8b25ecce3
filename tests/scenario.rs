// ==============================================
// SINGLE-SHARD SCENARIO TESTS (integration)
// ==============================================
//
// Capacity 1600 gives every shard exactly 100 slots: window 1, probation 19,
// protection 79. Keys are filtered to a single shard so the shard's segment
// arithmetic is observable through the public container.

use wtinylfu::{CacheBuilder, Location, WTinyLfuCache};

const KEYS: usize = 150;

fn keys_in_one_shard(cache: &WTinyLfuCache<usize>, count: usize) -> Vec<String> {
    let target = cache.shard_index("key-0");
    (0..)
        .map(|i| format!("key-{i}"))
        .filter(|key| cache.shard_index(key) == target)
        .take(count)
        .collect()
}

// ==============================================
// Warm-up Load
// ==============================================
//
// In loading mode every window candidate reaches probation. Reading the
// previous key right after each insert promotes it to protection, so the
// shard fills all three segments and keeps the most recent 99 keys.

mod warm_up_load {
    use super::*;

    #[test]
    fn most_recent_ninety_nine_keys_stay_resident() {
        let cache: WTinyLfuCache<usize> = CacheBuilder::new(1600).loading(true).build();
        let keys = keys_in_one_shard(&cache, KEYS);

        for (i, key) in keys.iter().enumerate() {
            cache.insert(key, i);
            if i > 0 {
                assert_eq!(cache.lookup(&keys[i - 1]).as_deref(), Some(&(i - 1)));
            }
        }

        assert_eq!(cache.len(), 99);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(
                cache.contains(key),
                i >= KEYS - 99,
                "key {i} residency is wrong"
            );
        }

        assert_eq!(cache.location(&keys[KEYS - 1]), Some(Location::Window));
        for key in &keys[KEYS - 80..KEYS - 1] {
            assert_eq!(cache.location(key), Some(Location::Protection));
        }
        for key in &keys[KEYS - 99..KEYS - 80] {
            assert_eq!(cache.location(key), Some(Location::Probation));
        }
        cache.check_invariants().unwrap();
    }

    #[test]
    fn resident_keys_hit_with_their_values() {
        let cache: WTinyLfuCache<usize> = CacheBuilder::new(1600).loading(true).build();
        let keys = keys_in_one_shard(&cache, KEYS);

        for (i, key) in keys.iter().enumerate() {
            cache.insert(key, i);
            if i > 0 {
                cache.lookup(&keys[i - 1]);
            }
        }

        for (i, key) in keys.iter().enumerate().skip(KEYS - 99) {
            let (value, stamped_at) = cache.lookup_with_timestamp(key).unwrap();
            assert_eq!(*value, i);
            assert!(stamped_at > 0);
        }
        for key in &keys[..KEYS - 99] {
            assert!(cache.lookup(key).is_none());
        }
    }

    #[test]
    fn loading_without_hits_keeps_window_and_probation() {
        let cache: WTinyLfuCache<usize> = CacheBuilder::new(1600).loading(true).build();
        let keys = keys_in_one_shard(&cache, KEYS);

        for (i, key) in keys.iter().enumerate() {
            cache.insert(key, i);
        }

        // Nothing reaches protection without a probation hit.
        assert_eq!(cache.len(), 20);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(cache.contains(key), i >= KEYS - 20, "key {i}");
        }
        cache.check_invariants().unwrap();
    }
}

// ==============================================
// Admission Filter
// ==============================================

mod admission_filter {
    use super::*;

    #[test]
    fn one_hit_wonders_never_leave_the_window() {
        // A wide sketch keeps collisions from faking a second sighting.
        let cache: WTinyLfuCache<usize> = CacheBuilder::new(1600).sketch_width(1 << 16).build();
        let keys = keys_in_one_shard(&cache, KEYS);

        for (i, key) in keys.iter().enumerate() {
            cache.insert(key, i);
        }

        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&keys[KEYS - 1]));
        assert!(!cache.contains(&keys[0]));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn repeated_keys_are_admitted_and_promoted() {
        let cache: WTinyLfuCache<usize> = CacheBuilder::new(1600).sketch_width(1 << 16).build();
        let keys = keys_in_one_shard(&cache, 3);
        let (a, b, c) = (&keys[0], &keys[1], &keys[2]);

        cache.insert(a, 0);
        cache.lookup(a);
        assert_eq!(cache.frequency(a), 2);

        cache.insert(b, 1);
        assert_eq!(cache.location(a), Some(Location::Probation));

        cache.lookup(a);
        assert_eq!(cache.location(a), Some(Location::Protection));
        cache.lookup(a);
        assert_eq!(cache.location(a), Some(Location::Protection));

        // b was seen once and is rejected when c pushes it out.
        cache.insert(c, 2);
        assert!(!cache.contains(b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn switching_loading_on_admits_once_seen_keys() {
        let cache: WTinyLfuCache<usize> = CacheBuilder::new(1600).sketch_width(1 << 16).build();
        let keys = keys_in_one_shard(&cache, 4);

        cache.insert(&keys[0], 0);
        cache.insert(&keys[1], 1);
        assert!(!cache.contains(&keys[0]));

        cache.set_loading(true);
        cache.insert(&keys[2], 2);
        assert_eq!(cache.location(&keys[1]), Some(Location::Probation));

        cache.set_loading(false);
        cache.insert(&keys[3], 3);
        assert!(!cache.contains(&keys[2]));
        assert!(cache.contains(&keys[1]));
    }

    #[test]
    fn decay_revokes_admission() {
        let cache: WTinyLfuCache<usize> = CacheBuilder::new(1600).sketch_width(1 << 16).build();
        let keys = keys_in_one_shard(&cache, 2);

        cache.insert(&keys[0], 0);
        cache.lookup(&keys[0]);
        cache.decay(&keys[0]);
        assert_eq!(cache.frequency(&keys[0]), 0);

        cache.insert(&keys[1], 1);
        assert!(!cache.contains(&keys[0]));
    }
}

// ==============================================
// Update and Peek
// ==============================================

mod side_effect_free_access {
    use super::*;

    #[test]
    fn update_and_peek_do_not_save_a_key_from_rejection() {
        let cache: WTinyLfuCache<usize> = CacheBuilder::new(1600).sketch_width(1 << 16).build();
        let keys = keys_in_one_shard(&cache, 2);

        cache.insert(&keys[0], 0);
        assert!(cache.update(&keys[0], 10));
        assert_eq!(cache.peek(&keys[0]).as_deref(), Some(&10));
        assert_eq!(cache.frequency(&keys[0]), 1);

        cache.insert(&keys[1], 1);
        assert!(!cache.contains(&keys[0]));
    }

    #[test]
    fn update_of_absent_key_inserts_nothing() {
        let cache: WTinyLfuCache<usize> = WTinyLfuCache::new(1600);
        assert!(!cache.update("absent", 1));
        assert!(cache.is_empty());
        assert_eq!(cache.frequency("absent"), 0);
    }
}

// ==============================================
// Small Capacity
// ==============================================
//
// Below 100 slots per shard the window rounds down to zero entries. It still
// keeps the newest key of its shard, so a fresh insert is readable at once.

mod small_capacity {
    use super::*;

    #[test]
    fn fresh_insert_is_a_hit() {
        let cache: WTinyLfuCache<u32> = WTinyLfuCache::new(1000);
        assert_eq!(*cache.insert("a", 1), 1);
        assert_eq!(cache.lookup("a").as_deref(), Some(&1));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn every_fresh_key_is_cached_right_after_insert() {
        let cache: WTinyLfuCache<u32> = WTinyLfuCache::new(1000);
        for i in 0..200 {
            let key = format!("fresh-{i}");
            cache.insert(&key, i);
            assert_eq!(cache.peek(&key).as_deref(), Some(&i), "{key}");
            assert_eq!(cache.location(&key), Some(Location::Window));
        }
        assert!(cache.contains("fresh-199"));
        cache.check_invariants().unwrap();
    }
}
