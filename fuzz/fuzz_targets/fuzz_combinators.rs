#![no_main]

use libfuzzer_sys::fuzz_target;

use slabvec_core::{BoundedSeq, PoolRegistry, SeqPool};

const CAP: usize = 64;

fuzz_target!(|data: &[u8]| {
    let mut registry = PoolRegistry::new();
    let pool = SeqPool::<u8, CAP>::new(&mut registry);
    let nested = SeqPool::<BoundedSeq<u8, CAP>, CAP>::new(&mut registry);

    let values: Vec<u8> = data.iter().copied().take(CAP).collect();
    let seq = BoundedSeq::collect_in(&pool, values.iter().copied());

    // Sorting must be an ordered permutation of the input.
    let sorted = seq.sort_by(&pool, |a, b| a < b);
    let mut expected = values.clone();
    expected.sort_unstable();
    assert_eq!(sorted.as_slice(), expected.as_slice());

    // Grouping then flattening must round-trip.
    let chunk = data.first().map_or(1, |b| usize::from(*b) % CAP + 1);
    let round_tripped = sorted.group(&nested, &pool, chunk).flatten(&pool);
    assert_eq!(round_tripped.as_slice(), expected.as_slice());

    // Every slot ever created comes back to a free list.
    drop(round_tripped);
    assert_eq!(pool.pooled() as u64, pool.stats().created());
});
