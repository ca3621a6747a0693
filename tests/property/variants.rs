//! The container variant is a function of cardinality alone.

use proptest::prelude::*;
use skipset::{ContainerKind, SkipSet, ARRAY_MAX_CARDINALITY};

use crate::common::{dense_ids, encode, encode_runs};

fn only_chunk_kind(set: &SkipSet) -> ContainerKind {
    let chunks: Vec<_> = set.index().chunks().collect();
    assert_eq!(chunks.len(), 1);
    chunks[0].kind
}

#[test]
fn test_boundary_4096_is_array() {
    let set = SkipSet::from_bytes(&encode(&dense_ids(0, 4096))).unwrap();
    assert_eq!(only_chunk_kind(&set), ContainerKind::Array);
    assert_eq!(set.len(), 4096);
}

#[test]
fn test_boundary_4097_is_bitmap() {
    let set = SkipSet::from_bytes(&encode(&dense_ids(0, 4097))).unwrap();
    assert_eq!(only_chunk_kind(&set), ContainerKind::Bitmap);
    assert_eq!(set.len(), 4097);
}

#[test]
fn test_boundary_holds_for_spread_values() {
    // Every 16th low value: same counts, no adjacency
    let ids: Vec<u32> = (0..4096).map(|i| i * 16).collect();
    let set = SkipSet::from_bytes(&encode(&ids)).unwrap();
    assert_eq!(only_chunk_kind(&set), ContainerKind::Array);

    let ids: Vec<u32> = (0..4097).map(|i| i * 15).collect();
    let set = SkipSet::from_bytes(&encode(&ids)).unwrap();
    assert_eq!(only_chunk_kind(&set), ContainerKind::Bitmap);
}

#[test]
fn test_runs_expand_by_cardinality() {
    // Both are single runs on the wire
    let small = SkipSet::from_bytes(&encode_runs(&dense_ids(100, 4096))).unwrap();
    assert_eq!(only_chunk_kind(&small), ContainerKind::Array);

    let large = SkipSet::from_bytes(&encode_runs(&dense_ids(100, 4097))).unwrap();
    assert_eq!(only_chunk_kind(&large), ContainerKind::Bitmap);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: each chunk's variant matches its member count, whatever
    /// layout it arrived in.
    #[test]
    fn prop_variant_tracks_cardinality(
        lows in prop::collection::btree_set(any::<u16>(), 1..9000),
        runs in any::<bool>(),
    ) {
        let ids: Vec<u32> = lows.iter().map(|&low| (3 << 16) | u32::from(low)).collect();
        let bytes = if runs { encode_runs(&ids) } else { encode(&ids) };
        let set = SkipSet::from_bytes(&bytes).unwrap();

        let expected = if ids.len() <= ARRAY_MAX_CARDINALITY {
            ContainerKind::Array
        } else {
            ContainerKind::Bitmap
        };
        prop_assert_eq!(only_chunk_kind(&set), expected);
        for chunk in set.index().chunks() {
            prop_assert_eq!(chunk.kind, ContainerKind::for_cardinality(chunk.cardinality as usize));
        }
    }
}
