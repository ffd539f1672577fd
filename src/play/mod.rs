//! PLAY statement conversion - parses the statement and resolves it to tones

pub mod command;
pub mod diagnostic;
pub mod parser;
pub mod pitch;
pub mod resolver;

use crate::emit::{self, OutputFormat};
use crate::error::Result;
use crate::wav::{self, WavWriter};
use command::Articulation;
use parser::ParsedStatement;
use resolver::Resolution;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Sample rate of the WAV output when none is given
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Conversion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayOptions {
    /// WAV output sample rate (Hz)
    pub sample_rate: u32,
    /// Starting octave
    pub octave: i32,
    /// Starting note length denominator
    pub length: u32,
    /// Starting tempo (quarter notes per minute)
    pub tempo: u32,
    pub articulation: Articulation,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            octave: 0,
            length: 4,
            tempo: 120,
            articulation: Articulation::Normal,
        }
    }
}

/// A parsed and resolved statement
#[derive(Debug, Clone)]
pub struct Conversion {
    pub statement: ParsedStatement,
    pub resolution: Resolution,
}

impl Conversion {
    /// Syntax diagnostics plus range warnings
    pub fn issue_count(&self) -> usize {
        self.statement.diagnostics.len() + self.resolution.warnings.len()
    }
}

/// Drives a statement through the whole pipeline
#[derive(Debug, Clone, Default)]
pub struct Converter {
    pub options: PlayOptions,
}

impl Converter {
    pub fn new(options: PlayOptions) -> Self {
        Self { options }
    }

    pub fn parse(&self, text: &str) -> ParsedStatement {
        parser::parse_with(text, &self.options)
    }

    pub fn resolve(&self, statement: &ParsedStatement) -> Resolution {
        resolver::resolve_with(&statement.commands, &self.options)
    }

    /// Parse and resolve a statement
    pub fn convert(&self, text: &str) -> Conversion {
        let statement = self.parse(text);
        let resolution = self.resolve(&statement);
        log::debug!(
            "{} notes, {} commands, {} tone events, {:.4}s",
            statement.note_count,
            statement.commands.len(),
            resolution.events.len(),
            resolution.total_duration
        );
        Conversion {
            statement,
            resolution,
        }
    }

    /// Render a statement straight to WAV bytes
    pub fn render_wav(&self, text: &str) -> Result<Vec<u8>> {
        let conversion = self.convert(text);
        let samples = wav::render(&conversion.resolution.events, self.options.sample_rate)?;
        wav::encode(&samples, self.options.sample_rate)
    }

    /// Write a conversion in the requested format
    ///
    /// Nothing is written if the samples cannot be rendered.
    pub fn write_output<W: Write>(
        &self,
        conversion: &Conversion,
        format: OutputFormat,
        writer: &mut W,
    ) -> Result<()> {
        let events = &conversion.resolution.events;
        match format {
            OutputFormat::Wav => {
                let samples = wav::render(events, self.options.sample_rate)?;
                WavWriter::new(self.options.sample_rate).write(writer, &samples)?;
            }
            OutputFormat::Ic => emit::ic::write_ic(writer, events)?,
            OutputFormat::Basic => emit::basic::write_basic(writer, events)?,
            OutputFormat::Json => {
                let json = emit::json::ToneJson::new(conversion);
                serde_json::to_writer_pretty(&mut *writer, &json)?;
                writer.write_all(b"\n")?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}
