//! Key hashing.
//!
//! - [`hash_key`]: the 32-bit hash used for shard selection and hash-index
//!   buckets. It is Paul Hsieh's SuperFastHash, whose final avalanche mixes
//!   the top bits well enough to pick shards from them.
//! - [`sketch_hashes`]: six cheap, weakly correlated string hashes (RS, JS,
//!   BKDR, SDBM, DJB, AP) addressing the rows of the frequency sketch.
//!
//! Key bytes are read as unsigned for the sketch families. SuperFastHash keeps
//! its reference behaviour of sign-extending the trailing odd bytes.

/// Hashes `key` for shard routing and index lookups.
///
/// Empty keys and keys longer than `i32::MAX` bytes hash to 0, so all such keys
/// share one bucket.
///
/// ```
/// use wtinylfu::hash::hash_key;
///
/// assert_eq!(hash_key("user:1"), hash_key("user:1"));
/// assert_eq!(hash_key(""), 0);
/// ```
pub fn hash_key(key: &str) -> u32 {
    super_fast_hash(key.as_bytes())
}

fn super_fast_hash(data: &[u8]) -> u32 {
    if data.is_empty() || data.len() > i32::MAX as usize {
        return 0;
    }

    let mut hash = data.len() as u32;
    let mut chunks = data.chunks_exact(4);
    for chunk in &mut chunks {
        hash = hash.wrapping_add(get16(&chunk[0..2]));
        let tmp = (get16(&chunk[2..4]) << 11) ^ hash;
        hash = (hash << 16) ^ tmp;
        hash = hash.wrapping_add(hash >> 11);
    }

    match *chunks.remainder() {
        [a, b, c] => {
            hash = hash.wrapping_add(get16(&[a, b]));
            hash ^= hash << 16;
            hash ^= (c as i8 as u32) << 18;
            hash = hash.wrapping_add(hash >> 11);
        },
        [a, b] => {
            hash = hash.wrapping_add(get16(&[a, b]));
            hash ^= hash << 11;
            hash = hash.wrapping_add(hash >> 17);
        },
        [a] => {
            hash = hash.wrapping_add(a as i8 as u32);
            hash ^= hash << 10;
            hash = hash.wrapping_add(hash >> 1);
        },
        _ => {},
    }

    hash ^= hash << 3;
    hash = hash.wrapping_add(hash >> 5);
    hash ^= hash << 4;
    hash = hash.wrapping_add(hash >> 17);
    hash ^= hash << 25;
    hash = hash.wrapping_add(hash >> 6);
    hash
}

#[inline]
fn get16(bytes: &[u8]) -> u32 {
    u32::from(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Number of independent hash families feeding the frequency sketch.
pub const SKETCH_FAMILIES: usize = 6;

/// Computes all sketch hash families for `key`, in row order.
pub fn sketch_hashes(key: &[u8]) -> [u32; SKETCH_FAMILIES] {
    [
        rs_hash(key),
        js_hash(key),
        bkdr_hash(key),
        sdbm_hash(key),
        djb_hash(key),
        ap_hash(key),
    ]
}

fn rs_hash(key: &[u8]) -> u32 {
    const B: u32 = 378_551;
    let mut a: u32 = 63_689;
    let mut hash: u32 = 0;
    for &byte in key {
        hash = hash.wrapping_mul(a).wrapping_add(u32::from(byte));
        a = a.wrapping_mul(B);
    }
    hash
}

fn js_hash(key: &[u8]) -> u32 {
    let mut hash: u32 = 1_315_423_911;
    for &byte in key {
        hash ^= (hash << 5).wrapping_add(u32::from(byte)).wrapping_add(hash >> 2);
    }
    hash
}

fn bkdr_hash(key: &[u8]) -> u32 {
    const SEED: u32 = 131;
    key.iter().fold(0u32, |hash, &byte| {
        hash.wrapping_mul(SEED).wrapping_add(u32::from(byte))
    })
}

fn sdbm_hash(key: &[u8]) -> u32 {
    key.iter().fold(0u32, |hash, &byte| {
        u32::from(byte)
            .wrapping_add(hash << 6)
            .wrapping_add(hash << 16)
            .wrapping_sub(hash)
    })
}

fn djb_hash(key: &[u8]) -> u32 {
    key.iter().fold(5381u32, |hash, &byte| {
        hash.wrapping_add((hash << 5).wrapping_add(u32::from(byte)))
    })
}

fn ap_hash(key: &[u8]) -> u32 {
    let mut hash: u32 = 0;
    for (i, &byte) in key.iter().enumerate() {
        let byte = u32::from(byte);
        if i & 1 == 0 {
            hash ^= (hash << 7) ^ byte ^ (hash >> 3);
        } else {
            hash ^= !((hash << 11) ^ byte ^ (hash >> 5));
        }
    }
    hash
}
