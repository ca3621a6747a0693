//! Queries are pure: same answers every time, index untouched.

use proptest::prelude::*;
use skipset::{deserialize, SkipSet};

use crate::common::{any_ids, encode, encode_runs, SAMPLE_IDS};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: a storm of queries leaves the fingerprint unchanged and
    /// every repeated query gets the same answer.
    #[test]
    fn prop_queries_do_not_mutate(ids in any_ids(), probes in prop::collection::vec(any::<u32>(), 1..200)) {
        let set = SkipSet::from_bytes(&encode(&ids)).unwrap();
        let before = set.index().fingerprint();

        let first: Vec<bool> = probes.iter().map(|&p| set.contains(p)).collect();
        let second: Vec<bool> = probes.iter().map(|&p| set.contains(p)).collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(set.index().fingerprint(), before);
    }

    /// Property: the fingerprint depends on the members only, not on how
    /// the bytes were laid out.
    #[test]
    fn prop_fingerprint_is_layout_independent(ids in any_ids()) {
        let plain = deserialize(&encode(&ids)).unwrap();
        let runs = deserialize(&encode_runs(&ids)).unwrap();
        prop_assert_eq!(plain.fingerprint(), runs.fingerprint());
    }
}

#[test]
fn test_decoding_twice_is_identical() {
    let bytes = encode(&SAMPLE_IDS);
    let a = deserialize(&bytes).unwrap();
    let b = deserialize(&bytes).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn test_fingerprint_separates_sets() {
    let a = deserialize(&encode(&[5, 70000])).unwrap();
    let b = deserialize(&encode(&[5, 70001])).unwrap();
    let empty = deserialize(&encode(&[])).unwrap();
    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), empty.fingerprint());
}

#[test]
fn test_concurrent_readers_agree() {
    use std::sync::Arc;
    use std::thread;

    let set = Arc::new(SkipSet::from_bytes(&encode(&SAMPLE_IDS)).unwrap());
    let before = set.index().fingerprint();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let set = Arc::clone(&set);
            thread::spawn(move || {
                (0..50_000u32)
                    .map(|i| i.wrapping_mul(2654435761).wrapping_add(t))
                    .chain(SAMPLE_IDS)
                    .filter(|&id| set.contains(id))
                    .count()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap() >= SAMPLE_IDS.len());
    }
    assert_eq!(set.index().fingerprint(), before);
}
