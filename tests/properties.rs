//! Property-based tests for the Huffman image codec.

use proptest::prelude::*;
use rust_huffman_image::{
    decode, encode, CanonicalCode, ChannelLayout, FrequencyTable, HuffmanTree, MAX_CODE_LENGTH,
};

fn layout_strategy() -> impl Strategy<Value = ChannelLayout> {
    prop_oneof![
        Just(ChannelLayout::Grayscale),
        Just(ChannelLayout::Rgb),
        Just(ChannelLayout::Rgba),
    ]
}

/// An image shape plus a sample buffer of the matching length, drawn from
/// a small alphabet so codes of several lengths show up.
fn image_strategy() -> impl Strategy<Value = (u32, u32, ChannelLayout, Vec<u8>)> {
    (1u32..24, 1u32..24, layout_strategy(), 1u8..=255).prop_flat_map(
        |(width, height, layout, alphabet)| {
            let len = (width * height) as usize * layout.channels() as usize;
            (
                Just(width),
                Just(height),
                Just(layout),
                prop::collection::vec(0..=alphabet, len),
            )
        },
    )
}

proptest! {
    #[test]
    fn prop_roundtrip_is_lossless((width, height, layout, samples) in image_strategy()) {
        let bytes = encode(&samples, width, height, layout).unwrap();
        let image = decode(&bytes).unwrap();

        prop_assert_eq!(image.width, width);
        prop_assert_eq!(image.height, height);
        prop_assert_eq!(image.layout, layout);
        prop_assert_eq!(image.samples, samples);
    }

    #[test]
    fn prop_encoding_is_deterministic((width, height, layout, samples) in image_strategy()) {
        let first = encode(&samples, width, height, layout).unwrap();
        let second = encode(&samples, width, height, layout).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_code_lengths_satisfy_kraft(
        counts in prop::collection::btree_map(any::<u8>(), 1u64..1_000_000, 1..64)
    ) {
        let table = FrequencyTable::from_counts(counts).unwrap();
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        let lengths = tree.code_lengths();

        prop_assert_eq!(lengths.len(), table.len());
        prop_assert!(lengths.kraft_sum() <= 1.0);
        if table.len() > 1 {
            prop_assert_eq!(tree.internal_count(), table.len() - 1);
        }
    }

    #[test]
    fn prop_canonical_code_matches_lengths(samples in prop::collection::vec(any::<u8>(), 1..2048)) {
        let lengths = HuffmanTree::from_samples(&samples).unwrap().code_lengths();
        let code = CanonicalCode::assign(&lengths, MAX_CODE_LENGTH).unwrap();

        for (symbol, length) in lengths.iter() {
            prop_assert_eq!(code.get(symbol).map(|word| word.length), Some(length));
        }
    }

    #[test]
    fn prop_frequency_total_matches_input(samples in prop::collection::vec(any::<u8>(), 1..4096)) {
        let table = FrequencyTable::from_samples(&samples).unwrap();
        let sum: u64 = table.iter().map(|(_, count)| count).sum();

        prop_assert_eq!(sum, samples.len() as u64);
        for (symbol, count) in table.iter() {
            prop_assert!(count > 0);
            prop_assert_eq!(count, samples.iter().filter(|&&s| s == symbol).count() as u64);
        }
    }

    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&bytes);
    }
}
