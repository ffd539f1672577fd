//! WAV file writer

use super::header::WavHeader;
use crate::error::Result;
use std::io::Write;

/// Peak output value; a little below `i16::MAX` so rounding cannot overflow
pub const PEAK: f64 = 32760.0;

/// Mono 16-bit PCM WAV writer
#[derive(Debug, Clone, Copy)]
pub struct WavWriter {
    sample_rate: u32,
}

impl WavWriter {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    /// Write header and normalized samples
    pub fn write<W: Write>(&self, out: &mut W, samples: &[f64]) -> Result<()> {
        let header = WavHeader::new(self.sample_rate, samples.len())?;
        out.write_all(header.as_bytes())?;
        out.write_all(&sample_bytes(samples))?;
        Ok(())
    }
}

/// Encode samples as a complete WAV byte stream
pub fn encode(samples: &[f64], sample_rate: u32) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    WavWriter::new(sample_rate).write(&mut bytes, samples)?;
    Ok(bytes)
}

/// Center the waveform and scale it to the 16-bit range
pub fn normalize(samples: &[f64]) -> Vec<i16> {
    let (mut min, mut max) = match samples.first() {
        Some(&first) => samples
            .iter()
            .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s))),
        None => (0.0, 0.0),
    };

    if min >= max {
        min -= 1.0;
        max += 1.0;
    }

    let mid = (min + max) / 2.0;
    min -= mid;
    max -= mid;
    let extent = min.abs().max(max.abs());
    let scale = PEAK / extent;

    samples
        .iter()
        .map(|&s| (scale * (s - mid)).round() as i16)
        .collect()
}

/// Normalized samples as little-endian bytes
fn sample_bytes(samples: &[f64]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for v in normalize(samples) {
        let v = v as u16;
        data.push((v & 0x00FF) as u8);
        data.push(((v & 0xFF00) >> 8) as u8);
    }
    data
}
