//! Canonical Huffman codes.
//!
//! Only code lengths are ever stored. Both the encoder and the decoder
//! re-derive the exact bit patterns from those lengths, so two runs over
//! the same [`CodeLengthTable`] always produce the same [`CanonicalCode`].

use std::collections::BTreeMap;

use crate::error::{CodecError, Result};

/// Longest code the container can carry.
pub const MAX_CODE_LENGTH: u8 = 32;

/// Symbol -> length of its code in bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeLengthTable {
    lengths: BTreeMap<u8, u8>,
}

impl CodeLengthTable {
    /// Builds a table from (symbol, length) pairs. A symbol may only
    /// appear once.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u8)>,
    {
        let mut lengths = BTreeMap::new();
        for (symbol, length) in pairs {
            if lengths.insert(symbol, length).is_some() {
                return Err(CodecError::format(format!(
                    "symbol {symbol} has more than one code length"
                )));
            }
        }
        if lengths.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        Ok(CodeLengthTable { lengths })
    }

    /// Wraps the leaf depths of a built tree, which are unique per symbol
    /// by construction.
    pub(crate) fn from_leaf_depths(lengths: BTreeMap<u8, u8>) -> Self {
        CodeLengthTable { lengths }
    }

    pub fn get(&self, symbol: u8) -> Option<u8> {
        self.lengths.get(&symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// (symbol, length) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.lengths.iter().map(|(&symbol, &length)| (symbol, length))
    }

    pub fn max_length(&self) -> u8 {
        self.lengths.values().copied().max().unwrap_or(0)
    }

    /// Sum of 2^-length over all symbols. A prefix code needs this to be <= 1.
    pub fn kraft_sum(&self) -> f64 {
        self.lengths
            .values()
            .map(|&length| 0.5f64.powi(length as i32))
            .sum()
    }
}

/// A code: `length` bits, stored in the low bits of `bits`, most
/// significant bit first on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codeword {
    pub length: u8,
    pub bits: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCode {
    // canonical order: by length, then symbol
    ordered: Vec<(u8, Codeword)>,
    lookup: [Option<Codeword>; 256],
}

impl CanonicalCode {
    /// Assigns canonical codes to `lengths`.
    ///
    /// Symbols are sorted by (length, symbol). The first gets code 0 and
    /// every following code is the previous code plus one, shifted left by
    /// the growth in length.
    ///
    /// Fails with `CodeLengthOverflow` if a length exceeds `max_length`
    /// (itself capped at [`MAX_CODE_LENGTH`]), and with `FormatMismatch`
    /// for zero lengths or lengths that oversubscribe the code space.
    pub fn assign(lengths: &CodeLengthTable, max_length: u8) -> Result<Self> {
        let max_length = max_length.min(MAX_CODE_LENGTH);

        let mut ordered: Vec<(u8, u8)> = lengths.iter().collect();
        if ordered.is_empty() {
            return Err(CodecError::EmptyInput);
        }

        let mut kraft = 0u64;
        for &(symbol, length) in &ordered {
            if length == 0 {
                return Err(CodecError::format(format!(
                    "symbol {symbol} has a zero-length code"
                )));
            }
            if length > max_length {
                return Err(CodecError::CodeLengthOverflow {
                    symbol,
                    length,
                    max: max_length,
                });
            }
            kraft += 1u64 << (max_length - length);
        }
        if kraft > 1u64 << max_length {
            return Err(CodecError::format("code lengths oversubscribe the code space"));
        }

        ordered.sort_by_key(|&(symbol, length)| (length, symbol));

        let mut codes = Vec::with_capacity(ordered.len());
        let mut lookup = [None; 256];
        let mut code = 0u64;
        let mut previous = ordered[0].1;
        for (i, &(symbol, length)) in ordered.iter().enumerate() {
            if i > 0 {
                code = (code + 1) << (length - previous);
            }
            previous = length;

            let codeword = Codeword {
                length,
                bits: code as u32,
            };
            codes.push((symbol, codeword));
            lookup[symbol as usize] = Some(codeword);
        }

        Ok(CanonicalCode {
            ordered: codes,
            lookup,
        })
    }

    pub fn get(&self, symbol: u8) -> Option<Codeword> {
        self.lookup[symbol as usize]
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Codes in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Codeword)> + '_ {
        self.ordered.iter().copied()
    }
}
