use crate::error::{CodecError, Result};

/// How the samples of one pixel are laid out. The discriminant is the
/// channel count and is what the container stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ChannelLayout {
    Grayscale = 1,
    Rgb = 3,
    Rgba = 4,
}

impl ChannelLayout {
    pub fn channels(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ChannelLayout {
    type Error = CodecError;

    fn try_from(descriptor: u8) -> Result<Self> {
        match descriptor {
            1 => Ok(ChannelLayout::Grayscale),
            3 => Ok(ChannelLayout::Rgb),
            4 => Ok(ChannelLayout::Rgba),
            other => Err(CodecError::UnsupportedLayout(other)),
        }
    }
}

/// Number of samples an image of the given shape holds, or
/// `DimensionOverflow` if it is above `limit`.
pub(crate) fn sample_count(width: u32, height: u32, layout: ChannelLayout, limit: u64) -> Result<u64> {
    (width as u64)
        .checked_mul(height as u64)
        .and_then(|pixels| pixels.checked_mul(layout.channels() as u64))
        .filter(|&samples| samples <= limit)
        .ok_or(CodecError::DimensionOverflow {
            width,
            height,
            channels: layout.channels(),
            limit,
        })
}

/// A decoded image: interleaved samples, pixels row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelImage {
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    pub samples: Vec<u8>,
}

impl PixelImage {
    pub fn new(width: u32, height: u32, layout: ChannelLayout, samples: Vec<u8>) -> Result<Self> {
        let expected = sample_count(width, height, layout, u64::MAX)?;
        if samples.len() as u64 != expected {
            return Err(CodecError::BufferSizeMismatch {
                expected,
                actual: samples.len() as u64,
                width,
                height,
                channels: layout.channels(),
            });
        }
        Ok(PixelImage {
            width,
            height,
            layout,
            samples,
        })
    }

    fn row_len(&self) -> usize {
        self.width as usize * self.layout.channels() as usize
    }

    /// The channel samples of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.layout.channels() as usize;
        let start = y as usize * self.row_len() + x as usize * channels;
        self.samples.get(start..start + channels)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks() panics on zero, and a zero-width image has no samples anyway
        self.samples.chunks(self.row_len().max(1))
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}
