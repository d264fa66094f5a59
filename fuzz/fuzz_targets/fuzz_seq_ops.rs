#![no_main]

use libfuzzer_sys::fuzz_target;

use slabvec_core::{BoundedSeq, PoolRegistry, SeqPool};

const CAP: usize = 32;

// Interpret the input as a mutation script and keep the sequence in
// lockstep with a Vec model.
fuzz_target!(|data: &[u8]| {
    let mut registry = PoolRegistry::new();
    let pool = SeqPool::<u8, CAP>::new(&mut registry);
    let mut seq = BoundedSeq::new(&pool);
    let mut model: Vec<u8> = Vec::new();

    let mut bytes = data.iter().copied();
    while let Some(op) = bytes.next() {
        match op % 5 {
            0 => {
                let v = bytes.next().unwrap_or(0);
                if model.len() < CAP {
                    seq.push(v);
                    model.push(v);
                }
            }
            1 => {
                let n = usize::from(bytes.next().unwrap_or(0)) % (CAP + 1);
                seq.truncate(n);
                model.truncate(n);
            }
            2 => {
                let n = usize::from(bytes.next().unwrap_or(0)) % (CAP + 1);
                seq.resize(n);
                model.resize(n, 0);
            }
            3 => {
                seq = seq.reverse();
                model.reverse();
            }
            _ => {
                let m = bytes.next().unwrap_or(2).max(1);
                seq = seq.filter(|x| x % m == 0);
                model.retain(|x| x % m == 0);
            }
        }
        assert!(seq.len() <= CAP);
        assert_eq!(seq.as_slice(), model.as_slice());
    }
});
