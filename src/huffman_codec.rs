use std::io::{Cursor, Read, Write};

use log::{debug, trace};

use crate::bitstream::{BitStreamReader, BitStreamWriter};
use crate::canonical::{CanonicalCode, MAX_CODE_LENGTH};
use crate::compressed_data::CompressedData;
use crate::error::{CodecError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::{DecodeTree, HuffmanTree};
use crate::image::{sample_count, ChannelLayout, PixelImage};
use crate::metadata::{ContainerHeader, ContainerInfo};

/// Limits applied by [`HuffmanImageCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Longest code accepted when encoding or decoding, at most 32.
    pub max_code_length: u8,
    /// Upper bound on width x height x channels.
    pub max_samples: u64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            max_code_length: MAX_CODE_LENGTH,
            max_samples: 1 << 28,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_code_length(mut self, bits: u8) -> Self {
        self.max_code_length = bits.clamp(1, MAX_CODE_LENGTH);
        self
    }

    pub fn with_max_samples(mut self, samples: u64) -> Self {
        self.max_samples = samples;
        self
    }
}

/// Encodes pixel buffers into self-describing Huffman containers and back.
///
/// The codec holds only its configuration; every call works on its own
/// buffers, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct HuffmanImageCodec {
    config: CodecConfig,
}

impl HuffmanImageCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Self {
        HuffmanImageCodec { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Builds the container for an interleaved, row-major sample buffer.
    pub fn compress(
        &self,
        samples: &[u8],
        width: u32,
        height: u32,
        layout: ChannelLayout,
    ) -> Result<CompressedData> {
        let expected = sample_count(width, height, layout, self.config.max_samples)?;
        if samples.len() as u64 != expected {
            return Err(CodecError::BufferSizeMismatch {
                expected,
                actual: samples.len() as u64,
                width,
                height,
                channels: layout.channels(),
            });
        }

        let frequencies = FrequencyTable::from_samples(samples)?;
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let code_lengths = tree.code_lengths();
        let code = CanonicalCode::assign(&code_lengths, self.config.max_code_length)?;
        trace!("canonical code: {:?}", code.iter().collect::<Vec<_>>());

        let mut writer = BitStreamWriter::with_capacity(samples.len());
        for &symbol in samples {
            let codeword = code
                .get(symbol)
                .ok_or_else(|| CodecError::format(format!("symbol {symbol} has no code")))?;
            writer.push_codeword(codeword);
        }
        let (payload, bit_count) = writer.finish();

        debug!(
            "encoded {}x{} {:?}: {} samples, {} distinct symbols, {} payload bits",
            width,
            height,
            layout,
            expected,
            frequencies.len(),
            bit_count
        );

        Ok(CompressedData {
            header: ContainerHeader {
                width,
                height,
                layout,
                code_lengths,
            },
            bit_count,
            payload,
        })
    }

    pub fn encode(
        &self,
        samples: &[u8],
        width: u32,
        height: u32,
        layout: ChannelLayout,
    ) -> Result<Vec<u8>> {
        self.compress(samples, width, height, layout)?.serialize()
    }

    pub fn encode_image(&self, image: &PixelImage) -> Result<Vec<u8>> {
        self.encode(&image.samples, image.width, image.height, image.layout)
    }

    /// Writes the container to `writer` and returns the number of bytes written.
    pub fn encode_to_writer<W: Write>(&self, image: &PixelImage, writer: &mut W) -> Result<usize> {
        let data = self.compress(&image.samples, image.width, image.height, image.layout)?;
        data.write_to(writer)?;
        Ok(data.encoded_len())
    }

    /// Rebuilds the pixels from a parsed container.
    pub fn decompress(&self, data: &CompressedData) -> Result<PixelImage> {
        let header = &data.header;
        let code = CanonicalCode::assign(&header.code_lengths, self.config.max_code_length)?;
        let tree = DecodeTree::from_code(&code)?;
        let mut reader = BitStreamReader::new(&data.payload, data.bit_count)?;

        let expected = header.sample_count();
        // every symbol costs at least one bit
        let mut samples = Vec::with_capacity(expected.min(data.bit_count) as usize);
        while (samples.len() as u64) < expected {
            match tree.decode_symbol(&mut reader)? {
                Some(symbol) => samples.push(symbol),
                None => {
                    return Err(CodecError::BitsExhausted {
                        produced: samples.len() as u64,
                        expected,
                    })
                }
            }
        }
        if reader.remaining() > 0 {
            return Err(CodecError::format(format!(
                "{} valid bits left after the last symbol",
                reader.remaining()
            )));
        }

        debug!(
            "decoded {}x{} {:?} from {} payload bits",
            header.width, header.height, header.layout, data.bit_count
        );
        PixelImage::new(header.width, header.height, header.layout, samples)
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<PixelImage> {
        let data = CompressedData::deserialize(bytes, self.config.max_samples)?;
        self.decompress(&data)
    }

    pub fn decode_from_reader<R: Read>(&self, reader: &mut R) -> Result<PixelImage> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.decode(&bytes)
    }

    /// Parses the header and valid-bit count, leaving the payload untouched.
    pub fn inspect(&self, bytes: &[u8]) -> Result<ContainerInfo> {
        ContainerInfo::read_from(&mut Cursor::new(bytes), self.config.max_samples)
    }
}

/// Encodes with the default configuration.
pub fn encode(samples: &[u8], width: u32, height: u32, layout: ChannelLayout) -> Result<Vec<u8>> {
    HuffmanImageCodec::new().encode(samples, width, height, layout)
}

/// Decodes with the default configuration.
pub fn decode(bytes: &[u8]) -> Result<PixelImage> {
    HuffmanImageCodec::new().decode(bytes)
}

pub fn inspect(bytes: &[u8]) -> Result<ContainerInfo> {
    HuffmanImageCodec::new().inspect(bytes)
}
