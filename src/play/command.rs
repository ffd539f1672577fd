//! Parsed PLAY commands

use serde::{Deserialize, Serialize};

/// How much of a note's nominal length is sounded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Articulation {
    /// 7/8 sounded, 1/8 rest (`MN`)
    #[default]
    Normal,
    /// Full length sounded (`ML`)
    Legato,
    /// 3/4 sounded, 1/4 rest (`MS`)
    Staccato,
}

/// Natural pitch class of a note letter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchClass {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl PitchClass {
    /// Map a note letter (either case) to its pitch class
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            _ => None,
        }
    }

    /// Semitone offset above C within an octave
    pub fn semitone(self) -> i32 {
        match self {
            Self::C => 0,
            Self::D => 2,
            Self::E => 4,
            Self::F => 5,
            Self::G => 7,
            Self::A => 9,
            Self::B => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn offset(self) -> i32 {
        match self {
            Self::Natural => 0,
            Self::Sharp => 1,
            Self::Flat => -1,
        }
    }
}

/// A note as written in the statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub pitch: PitchClass,
    pub accidental: Accidental,
    pub dotted: bool,
}

impl Note {
    pub fn new(pitch: PitchClass) -> Self {
        Self {
            pitch,
            accidental: Accidental::Natural,
            dotted: false,
        }
    }
}

/// One command of a parsed statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Note length denominator (`L`)
    SetDuration(u32),
    /// Absolute octave (`O`, `<`, `>`); range is enforced when resolving
    SetOctave(i32),
    /// Quarter notes per minute (`T`)
    SetTempo(u32),
    /// Rest of the given length (`P`)
    Pause { length: u32, dotted: bool },
    /// `MN`, `ML`, `MS`
    SetArticulation(Articulation),
    PlayNote(Note),
}
