//! Interactive C program output

use crate::error::Result;
use crate::play::resolver::ToneEvent;
use std::io::Write;

const BANNER: &str = "/**\n * BASIC PLAY statement converted to IC\n */\n\n";

/// Write the timeline as an IC `main` made of `tone` and `msleep` calls
///
/// Events with no duration are skipped.
pub fn write_ic<W: Write>(out: &mut W, events: &[ToneEvent]) -> Result<()> {
    out.write_all(BANNER.as_bytes())?;
    writeln!(out, "int main()\n{{")?;

    for event in events.iter().filter(|e| e.duration > 0.0) {
        if event.is_rest() {
            writeln!(out, "\tmsleep({}L);", (event.duration * 1000.0) as i64)?;
        } else {
            writeln!(out, "\ttone({:.4}, {:.4});", event.frequency, event.duration)?;
        }
    }

    writeln!(out, "\treturn 1;\n}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ic_output() {
        let events = [
            ToneEvent::tone(440.0, 0.2),
            ToneEvent::rest(0.03125),
            ToneEvent::rest(0.0),
        ];
        let mut out = Vec::new();
        write_ic(&mut out, &events).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("/**"));
        assert!(text.contains("int main()\n{\n\ttone(440.0000, 0.2000);\n\tmsleep(31L);\n\treturn 1;\n}\n"));
    }
}
