#![no_main]

use libfuzzer_sys::fuzz_target;
use rust_huffman_image::{decode, encode, ChannelLayout};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let bytes = encode(data, data.len() as u32, 1, ChannelLayout::Grayscale).unwrap();
    assert_eq!(data, decode(&bytes).unwrap().samples);
});
