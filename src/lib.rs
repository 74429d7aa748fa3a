//! # rust_huffman_image
//!
//! Lossless image compression with canonical Huffman codes.
//!
//! Samples are counted, a Huffman tree is built from the counts, and only
//! the resulting code lengths are stored in the container. The decoder
//! re-derives the same canonical codes from those lengths.
//!
//! ## Quick Start
//!
//! ```rust
//! use rust_huffman_image::{decode, encode, ChannelLayout};
//!
//! let pixels = [10, 10, 20, 30];
//! let bytes = encode(&pixels, 2, 2, ChannelLayout::Grayscale)?;
//!
//! let image = decode(&bytes)?;
//! assert_eq!(image.samples, pixels);
//! # Ok::<(), rust_huffman_image::CodecError>(())
//! ```
//!
//! ## Container layout
//!
//! All integers are little-endian.
//!
//! | Field | Size |
//! |---|---|
//! | magic `HUFI` | 4 |
//! | width | 4 |
//! | height | 4 |
//! | channel layout (1, 3 or 4) | 1 |
//! | distinct symbol count | 2 |
//! | (symbol, code length) pairs, ascending symbol | 2 per symbol |
//! | valid bit count | 8 |
//! | payload, MSB first, zero padded | ceil(bits / 8) |

pub mod bitstream;
pub mod canonical;
pub mod compressed_data;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod image;
pub mod metadata;

// Internal modules - not part of public API
mod min_heap;

// Re-export main types for convenience
pub use canonical::{CanonicalCode, CodeLengthTable, Codeword, MAX_CODE_LENGTH};
pub use compressed_data::CompressedData;
pub use error::{CodecError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{decode, encode, inspect, CodecConfig, HuffmanImageCodec};
pub use hufftree::HuffmanTree;
pub use image::{ChannelLayout, PixelImage};
pub use metadata::{ContainerHeader, ContainerInfo};
