use std::io::{Cursor, Read, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{CodecError, Result};
use crate::metadata::{ContainerHeader, ContainerInfo};

/// A complete container: header, valid-bit count and packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData {
    pub header: ContainerHeader,
    pub bit_count: u64,
    pub payload: Vec<u8>,
}

impl CompressedData {
    /// Size of the serialized container in bytes.
    pub fn encoded_len(&self) -> usize {
        self.header.encoded_len() + 8 + self.payload.len()
    }

    /// Container size relative to the raw samples (one byte each).
    pub fn compression_ratio(&self) -> f64 {
        self.encoded_len() as f64 / self.header.sample_count().max(1) as f64
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.header.write_to(writer)?;
        writer.write_u64::<LittleEndian>(self.bit_count)?;
        writer.write_all(&self.payload)?;
        Ok(())
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    pub fn deserialize(bytes: &[u8], max_samples: u64) -> Result<CompressedData> {
        let mut cursor = Cursor::new(bytes);
        let ContainerInfo { header, bit_count } = ContainerInfo::read_from(&mut cursor, max_samples)?;

        let mut payload = Vec::new();
        cursor.read_to_end(&mut payload)?;

        let expected_len = bit_count.div_ceil(8);
        let actual_len = payload.len() as u64;
        if actual_len < expected_len {
            return Err(CodecError::TruncatedStream {
                declared_bits: bit_count,
                available_bits: actual_len * 8,
            });
        }
        if actual_len > expected_len {
            return Err(CodecError::format(format!(
                "{} bytes follow the payload",
                actual_len - expected_len
            )));
        }

        Ok(CompressedData {
            header,
            bit_count,
            payload,
        })
    }
}
