#![no_main]

use libfuzzer_sys::fuzz_target;
use wtinylfu::hash::hash_key;
use wtinylfu::policy::w_tinylfu::{CacheShard, SegmentSizes};

// Fuzz arbitrary operation sequences on a single shard
//
// The first three bytes pick segment capacities; the rest are (op, key) pairs.
// After every step the index and the three segments must agree.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let sizes = SegmentSizes {
        window: usize::from(data[0] % 4),
        probation: usize::from(data[1] % 8),
        protection: usize::from(data[2] % 8),
    };
    let shard: CacheShard<u8> = CacheShard::with_sizes(sizes, 16);

    for pair in data[3..].chunks_exact(2) {
        let (op, raw) = (pair[0], pair[1]);
        let key = format!("k{}", raw % 32);
        let hash = hash_key(&key);

        match op % 7 {
            0 | 1 => {
                let handle = shard.insert(&key, hash, raw);
                assert_eq!(*handle, raw);
            },
            2 | 3 => {
                let peeked = shard.peek(&key, hash);
                let found = shard.lookup(&key, hash).map(|(value, _)| value);
                assert_eq!(peeked, found);
            },
            4 => {
                let present = shard.peek(&key, hash).is_some();
                assert_eq!(shard.update(&key, hash, raw), present);
            },
            5 => shard.set_loading(raw % 2 == 0),
            _ => shard.decay(&key),
        }

        if let Err(err) = shard.check_invariants() {
            panic!("shard invariant violated: {err}");
        }
        let (window, probation, protection) = shard.segment_lens();
        assert!(window <= sizes.window.max(1));
        assert!(probation <= sizes.probation.max(1));
        assert!(protection <= sizes.protection.max(1));
    }
});
