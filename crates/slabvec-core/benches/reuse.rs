//! Benchmark: pooled sequence reconstruction vs fresh Vec allocation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use slabvec_core::{BoundedSeq, PoolRegistry, SeqPool};

const CAP: usize = 256;

#[allow(clippy::cast_possible_truncation)]
fn bench_construct_drop(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct_drop");

    // Steady state: after the first iteration every construction reuses the
    // slot the previous iteration released.
    group.bench_function("bounded_seq_pooled", |b| {
        let mut registry = PoolRegistry::new();
        let pool = SeqPool::<u64, CAP>::new(&mut registry);
        pool.prewarm(1);
        b.iter(|| {
            let seq = BoundedSeq::from_fn(&pool, CAP, |i| i as u64);
            black_box(seq.len())
        });
    });

    group.bench_function("vec_baseline", |b| {
        b.iter(|| {
            let v: Vec<u64> = (0..CAP as u64).collect();
            black_box(v.len())
        });
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut registry = PoolRegistry::new();
    let pool = SeqPool::<u64, CAP>::new(&mut registry);
    pool.prewarm(4);

    c.bench_function("map_filter_pipeline", |b| {
        b.iter(|| {
            let sum: u64 = BoundedSeq::iterate(&pool, CAP, 1u64, |p| p + 1)
                .map(&pool, |x| x * 3)
                .filter(|x| x % 2 == 0)
                .into_iter()
                .sum();
            black_box(sum)
        });
    });
}

criterion_group!(benches, bench_construct_drop, bench_pipeline);
criterion_main!(benches);
