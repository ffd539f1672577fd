//! Text renderings of a tone timeline

pub mod basic;
pub mod ic;
pub mod json;

use crate::error::{Error, Result};
use std::path::Path;

/// Output file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// 16-bit PCM RIFF/WAVE
    Wav,
    /// Interactive C `tone` / `msleep` calls
    Ic,
    /// GW-BASIC `SOUND` statements
    Basic,
    /// Tone events as JSON
    Json,
}

impl OutputFormat {
    /// Pick the format from an output file suffix
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "wav" => Ok(Self::Wav),
            "ic" | "c" => Ok(Self::Ic),
            "bas" => Ok(Self::Basic),
            "json" => Ok(Self::Json),
            _ => Err(Error::UnknownFormat(path.display().to_string())),
        }
    }
}
