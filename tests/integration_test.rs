//! Integration tests for PLAY statement conversion
//!
//! These tests run whole statements through the pipeline, write real output
//! files and read them back.

use basicplay::emit::OutputFormat;
use basicplay::play::diagnostic::DiagnosticKind;
use basicplay::play::resolver::RangeWarning;
use basicplay::wav::{encode, render};
use basicplay::{Converter, PlayOptions};
use std::fs::File;
use std::path::Path;
use tempfile::tempdir;

/// Helper to convert a statement into a file of the given format
fn convert_to_file(statement: &str, format: OutputFormat, path: &Path) {
    let converter = Converter::default();
    let conversion = converter.convert(statement);
    let mut file = File::create(path).expect("Failed to create output");
    converter
        .write_output(&conversion, format, &mut file)
        .expect("Conversion failed");
}

/// Helper to read a WAV file back as 16-bit samples
fn read_wav(path: &Path) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).expect("Failed to open WAV");
    let spec = reader.spec();
    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .expect("Failed to read samples");
    (spec, samples)
}

fn le_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

// =============================================================================
// WAV output
// =============================================================================

#[test]
fn test_wav_file_is_readable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scale.wav");
    convert_to_file("O3 L4 c d e", OutputFormat::Wav, &path);

    let (spec, samples) = read_wav(&path);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    // Three 0.25s slots
    assert_eq!(samples.len(), 3 * 11025);
    let peak = samples.iter().map(|s| (*s as i32).abs()).max().unwrap();
    assert!(peak <= 32760);
    assert!(peak >= 32750);
}

#[test]
fn test_wav_note_is_followed_by_silence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("note.wav");
    convert_to_file("O3 a", OutputFormat::Wav, &path);

    let (_, samples) = read_wav(&path);
    // 7/8 of 11025 samples sounded, 1/8 silent
    let sounded = (0.25_f64 * 7.0 / 8.0 * 44100.0).round() as usize;
    assert_eq!(samples.len(), 11025);
    assert!(samples[..sounded].iter().any(|&s| s != 0));
    assert!(samples[sounded..].iter().all(|&s| s == 0));
}

#[test]
fn test_wav_custom_sample_rate() {
    let converter = Converter::new(PlayOptions {
        sample_rate: 8000,
        ..PlayOptions::default()
    });
    let bytes = converter.render_wav("ML c").unwrap();
    assert_eq!(le_u32(&bytes, 24), 8000);
    assert_eq!(le_u32(&bytes, 28), 16000);
    assert_eq!(le_u32(&bytes, 40) / 2, 2000);
}

#[test]
fn test_wav_round_trip_of_known_samples() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("two.wav");
    std::fs::write(&path, encode(&[0.0, 32760.0], 44100).unwrap()).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(le_u32(&bytes, 4), 2 * 2 + 36);
    assert_eq!(le_u32(&bytes, 40) / 2, 2);

    let (_, samples) = read_wav(&path);
    assert_eq!(samples, vec![-32760, 32760]);
}

#[test]
fn test_silent_statement() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rest.wav");
    convert_to_file("P8", OutputFormat::Wav, &path);

    let (_, samples) = read_wav(&path);
    // 1/8 * 120/60 = 0.25s
    assert_eq!(samples.len(), 11025);
    assert!(samples.iter().all(|&s| s == 0));
}

#[test]
fn test_rendered_rest_is_flat() {
    let conversion = Converter::default().convert("P4");
    let samples = render(&conversion.resolution.events, 44100).unwrap();
    assert_eq!(samples.len(), 22050);
    assert!(samples.iter().all(|&s| s == 0.0));
}

// =============================================================================
// Text output
// =============================================================================

#[test]
fn test_ic_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.ic");
    convert_to_file("O3 a MS b", OutputFormat::Ic, &path);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("int main()"));
    assert_eq!(text.matches("\ttone(").count(), 2);
    assert_eq!(text.matches("\tmsleep(").count(), 2);
    assert!(text.contains("\ttone(440.0000, 0.21"));
    assert!(text.contains("\tmsleep(62L);"));
    assert!(text.trim_end().ends_with('}'));
}

#[test]
fn test_basic_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.bas");
    convert_to_file("O3 ML a P4", OutputFormat::Basic, &path);

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["10 SOUND 440, 4.550", "20 SOUND 32767, 9.100", "30 END"]);
}

#[test]
fn test_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.json");
    convert_to_file("L4 c d e", OutputFormat::Json, &path);

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["note_count"], 3);
    assert_eq!(value["events"].as_array().unwrap().len(), 6);
    let total = value["total_duration"].as_f64().unwrap();
    assert!((total - 0.75).abs() < 1e-9);
}

// =============================================================================
// Whole statements
// =============================================================================

#[test]
fn test_minuet_statement() {
    let statement = "t40 o4 c2 L4 eg<b.>l16cd 12c>a14g>c<gl16gfef12e<a8l16b>cdefgagfedc<bag8ab>cdefgfedc";
    let conversion = Converter::default().convert(statement);
    assert!(conversion.statement.note_count > 40);
    assert!(conversion.resolution.total_duration > 0.0);
    assert_eq!(
        conversion.resolution.total_duration,
        conversion.resolution.events.iter().map(|e| e.duration).sum::<f64>()
    );
    // "12c" has no command to attach to
    assert!(conversion
        .statement
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::NumberNotExpected));
}

#[test]
fn test_malformed_statement_still_converts() {
    let conversion = Converter::default().convert("Z5 O9 T10 c");
    let kinds: Vec<DiagnosticKind> = conversion.statement.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![DiagnosticKind::UnrecognizedSymbol, DiagnosticKind::NumberNotExpected]
    );
    assert_eq!(
        conversion.resolution.warnings,
        vec![RangeWarning::OctaveTooHigh(9), RangeWarning::TempoTooLow(10)]
    );
    assert_eq!(conversion.resolution.state.octave, 6);
    assert_eq!(conversion.resolution.state.tempo, 32);
    // C at octave 6
    assert!((conversion.resolution.events[0].frequency - 261.63 * 8.0).abs() < 1e-9);
}

#[test]
fn test_output_format_detection() {
    assert_eq!(
        OutputFormat::from_path(Path::new("tune.wav")).unwrap(),
        OutputFormat::Wav
    );
    assert!(OutputFormat::from_path(Path::new("tune.mp3")).is_err());
}
