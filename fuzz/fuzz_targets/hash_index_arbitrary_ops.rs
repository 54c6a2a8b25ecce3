#![no_main]

use std::collections::HashMap;
use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use wtinylfu::ds::{HashIndex, Node, SlotArena, SlotId};
use wtinylfu::hash::hash_key;

// Fuzz insert/remove/lookup sequences on HashIndex against a HashMap model
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<Node<u8>> = SlotArena::new();
    let mut index = HashIndex::new();
    let mut model: HashMap<String, SlotId> = HashMap::new();

    for pair in data.chunks_exact(2) {
        let (op, raw) = (pair[0], pair[1]);
        let key = format!("k{}", raw % 48);
        let hash = hash_key(&key);

        match op % 3 {
            0 => {
                let id = arena.insert(Node::new(key.as_str(), hash, Arc::new(raw), 0));
                if let Some(replaced) = index.insert(&mut arena, id) {
                    assert_eq!(model.get(&key), Some(&replaced));
                    arena.remove(replaced);
                }
                model.insert(key.clone(), id);
            },
            1 => {
                let removed = index.remove(&mut arena, &key, hash);
                assert_eq!(removed, model.remove(&key));
                if let Some(id) = removed {
                    arena.remove(id);
                }
            },
            _ => {
                assert_eq!(index.lookup(&arena, &key, hash), model.get(&key).copied());
            },
        }

        assert_eq!(index.len(), model.len());
        assert!(index.bucket_count() >= index.len());
    }
});
