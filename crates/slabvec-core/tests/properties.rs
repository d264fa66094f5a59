//! Property-based tests for `BoundedSeq` against a plain `Vec` model.

use proptest::prelude::*;

use slabvec_core::{BoundedSeq, PoolRegistry, SeqPool};

const CAP: usize = 32;

/// One mutation step applied identically to the sequence and the model.
#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Truncate(usize),
    Resize(usize),
    FilterEven,
    Reverse,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        any::<i32>().prop_map(Op::Push),
        (0..=CAP).prop_map(Op::Truncate),
        (0..=CAP).prop_map(Op::Resize),
        Just(Op::FilterEven),
        Just(Op::Reverse),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Arbitrary op sequences keep the container in lockstep with a Vec,
    /// and the length never exceeds the fixed capacity.
    #[test]
    fn tracks_vec_model(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let mut registry = PoolRegistry::new();
        let pool = SeqPool::<i32, CAP>::new(&mut registry);
        let mut seq = BoundedSeq::new(&pool);
        let mut model: Vec<i32> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    if model.len() < CAP {
                        seq.push(v);
                        model.push(v);
                    }
                }
                Op::Truncate(n) => {
                    seq.truncate(n);
                    model.truncate(n);
                }
                Op::Resize(n) => {
                    seq.resize(n);
                    model.resize(n, 0);
                }
                Op::FilterEven => {
                    seq = seq.filter(|x| x % 2 == 0);
                    model.retain(|x| x % 2 == 0);
                }
                Op::Reverse => {
                    seq = seq.reverse();
                    model.reverse();
                }
            }
            prop_assert!(seq.len() <= CAP);
            prop_assert_eq!(seq.as_slice(), model.as_slice());
        }
    }

    /// Filtering yields an order-preserving subset.
    #[test]
    fn filter_is_an_ordered_subset(values in proptest::collection::vec(any::<i32>(), 0..CAP)) {
        let mut registry = PoolRegistry::new();
        let pool = SeqPool::<i32, CAP>::new(&mut registry);
        let seq = BoundedSeq::collect_in(&pool, values.iter().copied());

        let kept = seq.filter(|x| x % 3 == 0);
        let expected: Vec<i32> = values.iter().copied().filter(|x| x % 3 == 0).collect();
        prop_assert_eq!(kept.as_slice(), expected.as_slice());
    }

    /// Sorting produces the same multiset in nondecreasing order.
    #[test]
    fn sort_is_an_ordered_permutation(values in proptest::collection::vec(any::<i32>(), 0..CAP)) {
        let mut registry = PoolRegistry::new();
        let pool = SeqPool::<i32, CAP>::new(&mut registry);
        let seq = BoundedSeq::collect_in(&pool, values.iter().copied());

        let sorted = seq.sort_by(&pool, |a, b| a < b);
        let mut expected = values;
        expected.sort_unstable();
        prop_assert_eq!(sorted.as_slice(), expected.as_slice());
    }

    /// Splitting into chunks and flattening restores the original sequence.
    #[test]
    fn group_flatten_round_trip(
        values in proptest::collection::vec(any::<i32>(), 0..CAP),
        chunk in 1..=CAP,
    ) {
        let mut registry = PoolRegistry::new();
        let pool = SeqPool::<i32, CAP>::new(&mut registry);
        let nested = SeqPool::<BoundedSeq<i32, CAP>, CAP>::new(&mut registry);
        let seq = BoundedSeq::collect_in(&pool, values.iter().copied());

        let round_tripped = seq.group(&nested, &pool, chunk).flatten(&pool);
        prop_assert_eq!(round_tripped.as_slice(), values.as_slice());
    }

    /// Every slot ever created is back on a free list once all sequences
    /// are gone, regardless of the op mix.
    #[test]
    fn no_slot_leaks(ops in proptest::collection::vec(op_strategy(), 0..30)) {
        let mut registry = PoolRegistry::new();
        let pool = SeqPool::<i32, CAP>::new(&mut registry);

        {
            let mut seq = BoundedSeq::new(&pool);
            for op in ops {
                match op {
                    Op::Push(v) if seq.len() < CAP => seq.push(v),
                    Op::Push(_) => {}
                    Op::Truncate(n) => seq.truncate(n),
                    Op::Resize(n) => seq.resize(n),
                    Op::FilterEven => seq = seq.filter(|x| x % 2 == 0),
                    Op::Reverse => seq = seq.reverse(),
                }
            }
        }

        prop_assert_eq!(pool.pooled() as u64, pool.stats().created());
    }
}
