use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::canonical::CodeLengthTable;
use crate::error::{CodecError, Result};
use crate::image::{sample_count, ChannelLayout};

pub const MAGIC: [u8; 4] = *b"HUFI";

/// Everything in front of the valid-bit count: image shape and the code
/// lengths needed to rebuild the canonical code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    pub code_lengths: CodeLengthTable,
}

fn header_read_error(err: io::Error) -> CodecError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        CodecError::format("header ends early")
    } else {
        CodecError::Io(err)
    }
}

impl ContainerHeader {
    /// Samples the payload must decode to.
    pub fn sample_count(&self) -> u64 {
        (self.width as u64)
            .saturating_mul(self.height as u64)
            .saturating_mul(self.layout.channels() as u64)
    }

    /// Serialized size in bytes.
    pub fn encoded_len(&self) -> usize {
        MAGIC.len() + 4 + 4 + 1 + 2 + 2 * self.code_lengths.len()
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let distinct = u16::try_from(self.code_lengths.len())
            .map_err(|_| CodecError::format("more than 65535 distinct symbols"))?;

        writer.write_all(&MAGIC)?;
        writer.write_u32::<LittleEndian>(self.width)?;
        writer.write_u32::<LittleEndian>(self.height)?;
        writer.write_u8(self.layout.channels())?;
        writer.write_u16::<LittleEndian>(distinct)?;
        for (symbol, length) in self.code_lengths.iter() {
            writer.write_u8(symbol)?;
            writer.write_u8(length)?;
        }
        Ok(())
    }

    /// Parses and validates a header. `max_samples` bounds the declared
    /// image size before anything is sized from it.
    pub fn read_from<R: Read>(reader: &mut R, max_samples: u64) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic).map_err(header_read_error)?;
        if magic != MAGIC {
            return Err(CodecError::format(format!("bad magic {magic:02x?}")));
        }

        let width = reader.read_u32::<LittleEndian>().map_err(header_read_error)?;
        let height = reader.read_u32::<LittleEndian>().map_err(header_read_error)?;
        let layout = ChannelLayout::try_from(reader.read_u8().map_err(header_read_error)?)?;
        let samples = sample_count(width, height, layout, max_samples)?;

        let distinct = reader.read_u16::<LittleEndian>().map_err(header_read_error)?;
        if samples == 0 {
            return Err(CodecError::EmptyInput);
        }
        if distinct == 0 {
            return Err(CodecError::format(format!(
                "no code lengths for {samples} samples"
            )));
        }
        if distinct > 256 {
            return Err(CodecError::format(format!(
                "{distinct} distinct symbols declared, at most 256 exist"
            )));
        }

        let mut pairs = Vec::with_capacity(distinct as usize);
        let mut previous: Option<u8> = None;
        for _ in 0..distinct {
            let symbol = reader.read_u8().map_err(header_read_error)?;
            let length = reader.read_u8().map_err(header_read_error)?;
            if previous.is_some_and(|p| p >= symbol) {
                return Err(CodecError::format(format!(
                    "symbol {symbol} is out of order in the length table"
                )));
            }
            previous = Some(symbol);
            pairs.push((symbol, length));
        }

        Ok(ContainerHeader {
            width,
            height,
            layout,
            code_lengths: CodeLengthTable::from_pairs(pairs)?,
        })
    }
}

/// A parsed header together with the valid-bit count stored right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    pub header: ContainerHeader,
    pub bit_count: u64,
}

impl ContainerInfo {
    pub fn read_from<R: Read>(reader: &mut R, max_samples: u64) -> Result<Self> {
        let header = ContainerHeader::read_from(reader, max_samples)?;
        let bit_count = reader.read_u64::<LittleEndian>().map_err(|err| {
            if err.kind() == io::ErrorKind::UnexpectedEof {
                CodecError::format("valid-bit count is missing")
            } else {
                CodecError::Io(err)
            }
        })?;
        Ok(ContainerInfo { header, bit_count })
    }
}
