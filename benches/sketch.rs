//! Frequency sketch and hash micro-benchmarks.
//!
//! Run with: `cargo bench --bench sketch`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wtinylfu::ds::FrequencySketch;
use wtinylfu::hash::{hash_key, sketch_hashes};

const KEYS: usize = 10_000;

fn random_keys(seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..KEYS)
        .map(|_| format!("user:{}", rng.gen_range(0..1_000_000u32)))
        .collect()
}

fn bench_hashes(c: &mut Criterion) {
    let keys = random_keys(1);
    let mut group = c.benchmark_group("hash");
    group.throughput(Throughput::Elements(KEYS as u64));

    group.bench_function("hash_key", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(hash_key(key));
            }
        })
    });

    group.bench_function("sketch_hashes", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(sketch_hashes(key.as_bytes()));
            }
        })
    });

    group.finish();
}

fn bench_sketch(c: &mut Criterion) {
    let keys = random_keys(2);
    let mut group = c.benchmark_group("frequency_sketch");
    group.throughput(Throughput::Elements(KEYS as u64));

    for width in [128usize, 4_096, 65_536] {
        group.bench_with_input(BenchmarkId::new("record", width), &width, |b, &width| {
            let mut sketch = FrequencySketch::new(width);
            b.iter(|| {
                for key in &keys {
                    sketch.record(black_box(key));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("estimate", width), &width, |b, &width| {
            let mut sketch = FrequencySketch::new(width);
            for key in &keys {
                sketch.record(key);
            }
            b.iter(|| {
                for key in &keys {
                    black_box(sketch.estimate(key));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_hashes, bench_sketch);
criterion_main!(benches);
