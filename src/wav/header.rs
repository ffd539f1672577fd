//! RIFF/WAVE header definitions and writing

use crate::error::{Error, Result};

/// Header size in bytes (RIFF + fmt + data chunk headers)
pub const WAV_HEADER_SIZE: usize = 44;

/// Size of the PCM `fmt ` chunk body
pub const FMT_CHUNK_SIZE: u32 = 16;

/// Uncompressed PCM
pub const FORMAT_PCM: u16 = 1;

pub const CHANNELS: u16 = 1;

pub const BITS_PER_SAMPLE: u16 = 16;

/// Bytes per sample frame
pub const BLOCK_ALIGN: u16 = CHANNELS * BITS_PER_SAMPLE / 8;

/// Header offsets (in bytes)
pub mod offset {
    /// "RIFF" identifier
    pub const RIFF: usize = 0x00;
    /// RIFF chunk size (file size - 8)
    pub const RIFF_SIZE: usize = 0x04;
    /// "WAVE" form type
    pub const WAVE: usize = 0x08;
    /// "fmt " identifier
    pub const FMT: usize = 0x0C;
    pub const FMT_SIZE: usize = 0x10;
    pub const FORMAT_TAG: usize = 0x14;
    pub const CHANNELS: usize = 0x16;
    pub const SAMPLE_RATE: usize = 0x18;
    /// Average bytes per second
    pub const BYTE_RATE: usize = 0x1C;
    pub const BLOCK_ALIGN: usize = 0x20;
    pub const BITS_PER_SAMPLE: usize = 0x22;
    /// "data" identifier
    pub const DATA: usize = 0x24;
    /// Data chunk size in bytes
    pub const DATA_SIZE: usize = 0x28;
}

/// Header of a mono 16-bit PCM file
#[derive(Debug, Clone)]
pub struct WavHeader {
    data: [u8; WAV_HEADER_SIZE],
}

impl WavHeader {
    /// Header for `sample_count` samples at `sample_rate`
    ///
    /// Fails when the RIFF size (`2 * sample_count + 36`) does not fit in 32 bits.
    pub fn new(sample_rate: u32, sample_count: usize) -> Result<Self> {
        let data_size = sample_count
            .checked_mul(BLOCK_ALIGN as usize)
            .filter(|size| *size <= (u32::MAX - 36) as usize)
            .ok_or(Error::TooLong {
                samples: sample_count,
            })? as u32;

        let mut header = Self {
            data: [0; WAV_HEADER_SIZE],
        };

        header.write_tag(offset::RIFF, b"RIFF");
        header.write_u32(offset::RIFF_SIZE, data_size + 36);
        header.write_tag(offset::WAVE, b"WAVE");

        header.write_tag(offset::FMT, b"fmt ");
        header.write_u32(offset::FMT_SIZE, FMT_CHUNK_SIZE);
        header.write_u16(offset::FORMAT_TAG, FORMAT_PCM);
        header.write_u16(offset::CHANNELS, CHANNELS);
        header.write_u32(offset::SAMPLE_RATE, sample_rate);
        header.write_u32(offset::BYTE_RATE, sample_rate.wrapping_mul(BLOCK_ALIGN as u32));
        header.write_u16(offset::BLOCK_ALIGN, BLOCK_ALIGN);
        header.write_u16(offset::BITS_PER_SAMPLE, BITS_PER_SAMPLE);

        header.write_tag(offset::DATA, b"data");
        header.write_u32(offset::DATA_SIZE, data_size);

        Ok(header)
    }

    fn write_tag(&mut self, offset: usize, tag: &[u8; 4]) {
        self.data[offset..offset + 4].copy_from_slice(tag);
    }

    /// Little-endian regardless of host byte order
    pub fn write_u16(&mut self, offset: usize, value: u16) {
        if offset + 1 < WAV_HEADER_SIZE {
            self.data[offset] = (value & 0xFF) as u8;
            self.data[offset + 1] = ((value >> 8) & 0xFF) as u8;
        }
    }

    /// Little-endian regardless of host byte order
    pub fn write_u32(&mut self, offset: usize, value: u32) {
        if offset + 3 < WAV_HEADER_SIZE {
            self.data[offset] = (value & 0xFF) as u8;
            self.data[offset + 1] = ((value >> 8) & 0xFF) as u8;
            self.data[offset + 2] = ((value >> 16) & 0xFF) as u8;
            self.data[offset + 3] = ((value >> 24) & 0xFF) as u8;
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
