//! Note and frequency calculations

use super::command::Note;

/// Octave whose frequencies are listed in [`OCTAVE_3`]
pub const REFERENCE_OCTAVE: i32 = 3;

/// Frequencies (Hz) of the twelve semitones of octave 3, starting at C
pub const OCTAVE_3: [f64; 12] = [
    261.63, // C
    277.18, // C#, Db
    293.66, // D
    311.13, // D#, Eb
    329.63, // E
    349.23, // F
    369.99, // F#, Gb
    392.0,  // G
    415.30, // G#, Ab
    440.0,  // A
    466.16, // A#, Bb
    493.88, // B
];

/// Frequency of a note in the given octave
///
/// Accidentals wrap inside the octave row, so `B#` sounds as `C` and `C-` as
/// `B` of the same octave number.
pub fn frequency(note: &Note, octave: i32) -> f64 {
    let semitone = (note.pitch.semitone() + note.accidental.offset()).rem_euclid(12);
    OCTAVE_3[semitone as usize] * 2.0_f64.powi(octave - REFERENCE_OCTAVE)
}
