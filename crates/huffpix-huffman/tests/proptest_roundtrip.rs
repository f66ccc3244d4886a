//! Property-based tests for the Huffman pixel coder.
//!
//! These tests verify that coding properties hold across a wide range of inputs:
//! - Decoding the encoding reproduces the input exactly
//! - Rebuilding from the same histogram yields the same codes
//! - Output never exceeds eight bits per symbol
//!
//! Run with: cargo test -p huffpix-huffman --test proptest_roundtrip

use proptest::prelude::*;

use huffpix_core::ALPHABET_SIZE;
use huffpix_huffman::{
    decode, encode, CodeTable, FrequencyTable, HuffmanTree, PriorityQueue, TreeNode,
};

/// Strategy for pixel buffers with a small, skewed alphabet.
fn skewed_pixels_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            8 => Just(0u8),
            4 => Just(128u8),
            2 => 1u8..16,
            1 => any::<u8>(),
        ],
        1..2048,
    )
}

/// Strategy for arbitrary pixel buffers.
fn any_pixels_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..4096)
}

/// Strategy for sparse histograms.
fn histogram_strategy() -> impl Strategy<Value = Vec<(u8, u32)>> {
    prop::collection::vec((any::<u8>(), 1u32..10_000), 1..64)
}

fn codes_for(pixels: &[u8]) -> (Option<HuffmanTree>, CodeTable) {
    let tree = HuffmanTree::build(&FrequencyTable::from_pixels(pixels)).unwrap();
    let table = CodeTable::from_tree(tree.as_ref());
    (tree, table)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    })]

    /// Property: decode(encode(S)) == S for any non-empty S.
    #[test]
    fn prop_roundtrip_any(pixels in any_pixels_strategy()) {
        let (tree, table) = codes_for(&pixels);
        let encoded = encode(&pixels, &table).unwrap();
        let decoded = decode(encoded.as_bytes(), tree.as_ref(), pixels.len()).unwrap();
        prop_assert_eq!(decoded, pixels);
    }

    /// Property: round-trip also holds for highly skewed inputs with long codes.
    #[test]
    fn prop_roundtrip_skewed(pixels in skewed_pixels_strategy()) {
        let (tree, table) = codes_for(&pixels);
        let encoded = encode(&pixels, &table).unwrap();
        let decoded = decode(encoded.as_bytes(), tree.as_ref(), pixels.len()).unwrap();
        prop_assert_eq!(decoded, pixels);
    }

    /// Property: encoded size never exceeds the raw size.
    #[test]
    fn prop_compression_bound(pixels in any_pixels_strategy()) {
        let (_, table) = codes_for(&pixels);
        let encoded = encode(&pixels, &table).unwrap();
        prop_assert!(
            encoded.bit_len() <= 8 * pixels.len() as u64,
            "{} bits for {} symbols",
            encoded.bit_len(),
            pixels.len()
        );
        prop_assert_eq!(encoded.len() as u64, encoded.bit_len().div_ceil(8));
    }

    /// Property: codes depend only on the histogram, not on insertion order.
    #[test]
    fn prop_deterministic_codes(entries in histogram_strategy()) {
        let mut counts = [0u32; ALPHABET_SIZE];
        for &(symbol, count) in &entries {
            counts[symbol as usize] = count;
        }
        let freqs = FrequencyTable::from_counts(counts);

        let built = HuffmanTree::build(&freqs).unwrap();

        let mut reversed = PriorityQueue::new();
        for (symbol, count) in freqs.iter_present().collect::<Vec<_>>().into_iter().rev() {
            reversed.insert(TreeNode::leaf(symbol, count as u64), count as u64, symbol);
        }
        let rebuilt = HuffmanTree::from_queue(reversed);

        let a = CodeTable::from_tree(built.as_ref());
        let b = CodeTable::from_tree(rebuilt.as_ref());
        for symbol in 0..=255u8 {
            prop_assert_eq!(
                a.get(symbol).map(|c| c.to_string()),
                b.get(symbol).map(|c| c.to_string())
            );
        }
    }

    /// Property: the tree's root frequency equals the input length.
    #[test]
    fn prop_root_frequency(pixels in any_pixels_strategy()) {
        let (tree, table) = codes_for(&pixels);
        let tree = tree.unwrap();
        prop_assert_eq!(tree.frequency(), pixels.len() as u64);
        prop_assert_eq!(tree.leaf_count(), table.len());
    }
}
