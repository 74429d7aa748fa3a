use bitvec::prelude::*;

use crate::canonical::Codeword;
use crate::error::{CodecError, Result};

/// Packs variable-length codes most significant bit first. The last byte
/// is padded with zero bits; the exact number of valid bits is returned by
/// [`finish`](BitStreamWriter::finish).
#[derive(Debug, Default)]
pub struct BitStreamWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitStreamWriter {
    pub fn new() -> Self {
        BitStreamWriter { bits: BitVec::new() }
    }

    pub fn with_capacity(bits: usize) -> Self {
        BitStreamWriter {
            bits: BitVec::with_capacity(bits),
        }
    }

    pub fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Appends the low `length` bits of `pattern`, high bit first.
    pub fn push_bits(&mut self, pattern: u32, length: u8) {
        let length = length.min(32) as usize;
        self.bits
            .extend_from_bitslice(&pattern.view_bits::<Msb0>()[32 - length..]);
    }

    pub fn push_codeword(&mut self, codeword: Codeword) {
        self.push_bits(codeword.bits, codeword.length);
    }

    pub fn bit_count(&self) -> u64 {
        self.bits.len() as u64
    }

    /// Returns the packed bytes and the number of valid bits in them.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        let bit_count = self.bit_count();
        self.bits.set_uninitialized(false);
        (self.bits.into_vec(), bit_count)
    }
}

/// Reads back a stream produced by [`BitStreamWriter`], one bit at a time.
/// Padding past the valid-bit count is never returned.
#[derive(Debug)]
pub struct BitStreamReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
    position: usize,
}

impl<'a> BitStreamReader<'a> {
    pub fn new(bytes: &'a [u8], valid_bits: u64) -> Result<Self> {
        let available = bytes.len() as u64 * 8;
        if valid_bits > available {
            return Err(CodecError::TruncatedStream {
                declared_bits: valid_bits,
                available_bits: available,
            });
        }
        Ok(BitStreamReader {
            bits: &bytes.view_bits::<Msb0>()[..valid_bits as usize],
            position: 0,
        })
    }

    /// The next bit, or `None` once every valid bit has been read.
    pub fn read_bit(&mut self) -> Option<bool> {
        let bit = *self.bits.get(self.position)?;
        self.position += 1;
        Some(bit)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> u64 {
        self.position as u64
    }

    pub fn remaining(&self) -> u64 {
        (self.bits.len() - self.position) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_packing() {
        let mut writer = BitStreamWriter::new();
        writer.push_bits(0b101, 3);
        writer.push_bits(0b1, 1);
        writer.push_bits(0b0011, 4);
        writer.push_bits(0b11, 2);

        let (bytes, bit_count) = writer.finish();
        assert_eq!(bit_count, 10);
        assert_eq!(bytes, vec![0b1011_0011, 0b1100_0000]);
    }

    #[test]
    fn test_padding_is_zero() {
        let mut writer = BitStreamWriter::new();
        for _ in 0..3 {
            writer.push_bit(true);
        }
        let (bytes, bit_count) = writer.finish();
        assert_eq!(bit_count, 3);
        assert_eq!(bytes, vec![0b1110_0000]);
    }

    #[test]
    fn test_long_codes() {
        let mut writer = BitStreamWriter::new();
        writer.push_bits(0xDEAD_BEEF, 32);
        writer.push_bits(0, 0);
        let (bytes, bit_count) = writer.finish();
        assert_eq!(bit_count, 32);
        assert_eq!(bytes, vec![0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn test_reader_stops_at_valid_bits() {
        let bytes = [0b1010_0000];
        let mut reader = BitStreamReader::new(&bytes, 3).unwrap();

        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), Some(false));
        assert_eq!(reader.remaining(), 1);
        assert_eq!(reader.read_bit(), Some(true));
        // padding bits are not data
        assert_eq!(reader.read_bit(), None);
        assert_eq!(reader.position(), 3);
    }

    #[test]
    fn test_reader_rejects_short_buffer() {
        let bytes = [0xFF, 0xFF];
        assert!(matches!(
            BitStreamReader::new(&bytes, 17),
            Err(CodecError::TruncatedStream {
                declared_bits: 17,
                available_bits: 16
            })
        ));
    }

    #[test]
    fn test_writer_reader_agree() {
        let codes = [(0b0u32, 1u8), (0b110, 3), (0b1_0000_0001, 9), (0b01, 2)];
        let mut writer = BitStreamWriter::with_capacity(64);
        for &(bits, length) in &codes {
            writer.push_bits(bits, length);
        }
        let (bytes, bit_count) = writer.finish();

        let mut reader = BitStreamReader::new(&bytes, bit_count).unwrap();
        for &(bits, length) in &codes {
            let mut value = 0u32;
            for _ in 0..length {
                value = (value << 1) | reader.read_bit().unwrap() as u32;
            }
            assert_eq!(value, bits);
        }
        assert_eq!(reader.read_bit(), None);
    }
}
