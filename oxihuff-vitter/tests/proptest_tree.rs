//! Property tests for the adaptive code tree and the raw stream.

use oxihuff_vitter::{
    AdaptiveCodeTree, Insertion, VitterConfig, compress, decode, decompress, encode,
};
use proptest::prelude::*;

/// Byte strings drawn from a small alphabet, so that repeats dominate.
fn skewed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop_oneof![4 => 0u8..4, 1 => any::<u8>()], 0..600)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_invariants_hold_after_every_insert(data in skewed_bytes()) {
        let mut tree = AdaptiveCodeTree::new();
        for &symbol in &data {
            tree.insert(symbol).unwrap();
            prop_assert!(tree.check_invariants().is_ok(), "{:?}", tree.check_invariants());
        }
        prop_assert_eq!(tree.total_weight(), data.len() as u64);
        prop_assert_eq!(tree.node_count(), 2 * tree.symbol_count() + 1);
    }

    #[test]
    fn prop_insertion_reports_prior_code(data in skewed_bytes()) {
        let mut tree = AdaptiveCodeTree::new();
        for &symbol in &data {
            let before = tree.code_for_symbol(symbol);
            let escape = tree.nyt_code();
            match tree.insert(symbol).unwrap() {
                Insertion::Known { code } => prop_assert_eq!(Some(code), before),
                Insertion::New { escape: sent } => {
                    prop_assert!(before.is_none());
                    prop_assert_eq!(sent, escape);
                }
            }
        }
    }

    #[test]
    fn prop_codes_match_walk(data in skewed_bytes()) {
        let mut tree = AdaptiveCodeTree::new();
        for &symbol in &data {
            tree.insert(symbol).unwrap();
        }
        for (symbol, code) in tree.codes() {
            let walked = tree.get_code(|node| node.symbol() == Some(symbol));
            prop_assert_eq!(walked, Some(code));
        }
    }

    #[test]
    fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2000)) {
        let encoded = encode(&data, VitterConfig::DEFAULT).unwrap();
        let decoded = decode(&encoded, data.len(), VitterConfig::DEFAULT).unwrap();
        prop_assert_eq!(decoded, data);
    }

    #[test]
    fn prop_roundtrip_skewed(data in skewed_bytes()) {
        let encoded = encode(&data, VitterConfig::PARANOID).unwrap();
        let decoded = decode(&encoded, data.len(), VitterConfig::PARANOID).unwrap();
        prop_assert_eq!(decoded, data);
    }

    #[test]
    fn prop_frame_roundtrip(data in skewed_bytes()) {
        let framed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&framed).unwrap(), data);
    }
}
