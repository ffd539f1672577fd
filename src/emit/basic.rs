//! GW-BASIC `SOUND` statement output

use crate::error::Result;
use crate::play::resolver::ToneEvent;
use std::io::Write;

/// `SOUND` durations are given in system clock ticks
pub const TICKS_PER_SECOND: f64 = 18.2;

/// `SOUND` frequency that is too high to hear, used for rests
pub const SILENT_FREQUENCY: u32 = 32767;

const LINE_STEP: u32 = 10;

/// Write the timeline as numbered `SOUND` lines followed by `END`
pub fn write_basic<W: Write>(out: &mut W, events: &[ToneEvent]) -> Result<()> {
    let mut line = LINE_STEP;

    for event in events.iter().filter(|e| e.duration > 0.0) {
        let frequency = if event.is_rest() {
            SILENT_FREQUENCY
        } else {
            event.frequency.round() as u32
        };
        let ticks = event.duration * TICKS_PER_SECOND;
        writeln!(out, "{line} SOUND {frequency}, {ticks:.3}")?;
        line += LINE_STEP;
    }

    writeln!(out, "{line} END")?;
    Ok(())
}
