//! Turns parsed commands into a timeline of tone events

use super::command::{Articulation, Command, Note};
use super::pitch;
use super::PlayOptions;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_OCTAVE: i32 = 0;
pub const MAX_OCTAVE: i32 = 6;
pub const MIN_TEMPO: u32 = 32;
pub const MAX_TEMPO: u32 = 255;

/// One unit of the playback timeline; a frequency of 0 is a rest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneEvent {
    /// Hz
    pub frequency: f64,
    /// Seconds
    pub duration: f64,
}

impl ToneEvent {
    pub fn tone(frequency: f64, duration: f64) -> Self {
        Self {
            frequency,
            duration,
        }
    }

    pub fn rest(duration: f64) -> Self {
        Self {
            frequency: 0.0,
            duration,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.frequency <= 0.0
    }
}

/// A value that was out of range and replaced while resolving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeWarning {
    OctaveTooLow(i32),
    OctaveTooHigh(i32),
    TempoTooLow(u32),
    TempoTooHigh(u32),
    /// `L0`, the previous length is kept
    ZeroLength,
    /// `P0`, the pause is skipped
    ZeroPause,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OctaveTooLow(o) => {
                write!(f, "WARNING: Octave set at {o}; minimum is {MIN_OCTAVE}!")
            }
            Self::OctaveTooHigh(o) => {
                write!(f, "WARNING: Octave set at {o}; maximum is {MAX_OCTAVE}!")
            }
            Self::TempoTooLow(t) => write!(
                f,
                "WARNING: Quarter notes per minute set to {t}; minimum is {MIN_TEMPO}!"
            ),
            Self::TempoTooHigh(t) => write!(
                f,
                "WARNING: Quarter notes per minute set to {t}; maximum is {MAX_TEMPO}!"
            ),
            Self::ZeroLength => write!(f, "WARNING: Note length 0 ignored!"),
            Self::ZeroPause => write!(f, "WARNING: Pause length 0 ignored!"),
        }
    }
}

/// Musical state while walking the command sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MusicalState {
    pub octave: i32,
    /// Note length denominator (4 = quarter note)
    pub length: u32,
    /// Quarter notes per minute
    pub tempo: u32,
    pub articulation: Articulation,
}

impl MusicalState {
    /// Seconds of an undotted note of the current length
    pub fn note_length(&self) -> f64 {
        1.0 / self.length as f64 * 60.0 / self.tempo as f64
    }
}

impl Default for MusicalState {
    fn default() -> Self {
        Self {
            octave: 0,
            length: 4,
            tempo: 120,
            articulation: Articulation::Normal,
        }
    }
}

/// Resolved timeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub events: Vec<ToneEvent>,
    /// Sum of all event durations, in seconds
    pub total_duration: f64,
    pub warnings: Vec<RangeWarning>,
    /// State after the last command
    pub state: MusicalState,
}

struct Resolver {
    state: MusicalState,
    out: Resolution,
}

pub fn resolve(commands: &[Command]) -> Resolution {
    resolve_with(commands, &PlayOptions::default())
}

pub fn resolve_with(commands: &[Command], options: &PlayOptions) -> Resolution {
    let mut resolver = Resolver {
        state: MusicalState::default(),
        out: Resolution::default(),
    };

    // Starting values go through the same range checks as the statement's own
    let start = [
        Command::SetOctave(options.octave),
        Command::SetDuration(options.length),
        Command::SetTempo(options.tempo),
        Command::SetArticulation(options.articulation),
    ];
    for command in start.iter().chain(commands) {
        resolver.apply(command);
    }
    resolver.out.state = resolver.state;
    resolver.out
}

impl Resolver {
    fn warn(&mut self, warning: RangeWarning) {
        log::warn!("{}", warning);
        self.out.warnings.push(warning);
    }

    fn add(&mut self, event: ToneEvent) {
        self.out.total_duration += event.duration;
        self.out.events.push(event);
    }

    fn apply(&mut self, command: &Command) {
        match *command {
            Command::PlayNote(note) => self.play_note(&note),
            Command::Pause { length, dotted } => self.pause(length, dotted),
            Command::SetTempo(tempo) => {
                self.state.tempo = if tempo < MIN_TEMPO {
                    self.warn(RangeWarning::TempoTooLow(tempo));
                    MIN_TEMPO
                } else if tempo > MAX_TEMPO {
                    self.warn(RangeWarning::TempoTooHigh(tempo));
                    MAX_TEMPO
                } else {
                    tempo
                };
            }
            Command::SetDuration(length) => {
                if length == 0 {
                    self.warn(RangeWarning::ZeroLength);
                } else {
                    self.state.length = length;
                }
            }
            Command::SetOctave(octave) => {
                self.state.octave = if octave < MIN_OCTAVE {
                    self.warn(RangeWarning::OctaveTooLow(octave));
                    MIN_OCTAVE
                } else if octave > MAX_OCTAVE {
                    self.warn(RangeWarning::OctaveTooHigh(octave));
                    MAX_OCTAVE
                } else {
                    octave
                };
            }
            Command::SetArticulation(articulation) => self.state.articulation = articulation,
        }
    }

    fn play_note(&mut self, note: &Note) {
        let hertz = pitch::frequency(note, self.state.octave);

        let mut length = self.state.note_length();
        if note.dotted {
            length = length * 3.0 / 2.0;
        }

        match self.state.articulation {
            Articulation::Normal => {
                self.add(ToneEvent::tone(hertz, length * 7.0 / 8.0));
                self.add(ToneEvent::rest(length / 8.0));
            }
            Articulation::Legato => self.add(ToneEvent::tone(hertz, length)),
            Articulation::Staccato => {
                self.add(ToneEvent::tone(hertz, length * 3.0 / 4.0));
                self.add(ToneEvent::rest(length / 4.0));
            }
        }
    }

    /// Pause lengths scale with the tempo rather than against it
    fn pause(&mut self, length: u32, dotted: bool) {
        if length == 0 {
            self.warn(RangeWarning::ZeroPause);
            return;
        }

        let mut seconds = 1.0 / length as f64 * self.state.tempo as f64 / 60.0;
        if dotted {
            seconds = seconds * 3.0 / 2.0;
        }
        self.add(ToneEvent::rest(seconds));
    }
}
