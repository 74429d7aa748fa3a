use std::io;

use thiserror::Error;

/// Errors produced while encoding or decoding a Huffman image container.
#[derive(Error, Debug)]
pub enum CodecError {
    /// There are no symbols to build a code from
    #[error("cannot build a Huffman code for zero symbols")]
    EmptyInput,

    /// A code length is longer than the configured maximum
    #[error("code length {length} for symbol {symbol} exceeds the maximum of {max} bits")]
    CodeLengthOverflow { symbol: u8, length: u8, max: u8 },

    /// Bad magic or a structurally invalid header/payload
    #[error("malformed container: {reason}")]
    FormatMismatch { reason: String },

    /// The payload holds fewer bits than the header declares
    #[error("payload truncated: {declared_bits} bits declared, only {available_bits} present")]
    TruncatedStream {
        declared_bits: u64,
        available_bits: u64,
    },

    /// The valid bits ran out before every symbol was decoded
    #[error("bitstream exhausted after {produced} of {expected} symbols")]
    BitsExhausted { produced: u64, expected: u64 },

    /// width x height x channels is larger than the supported bound
    #[error("{width}x{height} image with {channels} channel(s) exceeds the limit of {limit} samples")]
    DimensionOverflow {
        width: u32,
        height: u32,
        channels: u8,
        limit: u64,
    },

    /// Channel count outside {1, 3, 4}
    #[error("unsupported channel layout descriptor {0}")]
    UnsupportedLayout(u8),

    /// The pixel buffer length disagrees with the dimensions
    #[error("pixel buffer holds {actual} samples, expected {expected} for {width}x{height} with {channels} channel(s)")]
    BufferSizeMismatch {
        expected: u64,
        actual: u64,
        width: u32,
        height: u32,
        channels: u8,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CodecError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        CodecError::FormatMismatch {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
