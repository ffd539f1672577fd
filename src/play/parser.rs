//! PLAY statement parser
//!
//! Scans the statement one character at a time. Malformed input never stops the
//! scan: the offending character is reported and parsing resumes right after it.

use super::command::{Accidental, Articulation, Command, Note, PitchClass};
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::PlayOptions;

/// Longest operand, in digits
pub const MAX_NUMBER_LENGTH: usize = 5;

/// Result of parsing one statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedStatement {
    pub commands: Vec<Command>,
    /// Notes plus pauses that received a length
    pub note_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Command waiting for its numeric operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Duration,
    Octave,
    Pause,
    Tempo,
    /// Note with a length override, e.g. `c8`
    Note(Note),
}

struct Parser {
    text: Vec<char>,
    pos: usize,
    pending: Option<Pending>,
    /// Operand digits read so far
    digits: usize,
    value: u32,
    /// Octave after the last `O`, `<` or `>`
    last_octave: i32,
    /// Length after the last `L`, restored after a note override
    last_duration: u32,
    out: ParsedStatement,
}

/// Parse a statement with the default starting octave and length
pub fn parse(text: &str) -> ParsedStatement {
    parse_with(text, &PlayOptions::default())
}

/// Parse a statement; `options` supplies the octave and length `<`, `>` and
/// note length overrides start from
pub fn parse_with(text: &str, options: &PlayOptions) -> ParsedStatement {
    let mut parser = Parser {
        text: text.chars().collect(),
        pos: 0,
        pending: None,
        digits: 0,
        value: 0,
        last_octave: options.octave,
        last_duration: options.length,
        out: ParsedStatement::default(),
    };
    parser.run();
    parser.out
}

impl Parser {
    fn peek(&self, ahead: usize) -> Option<char> {
        self.text.get(self.pos + ahead).copied()
    }

    fn report(&mut self, kind: DiagnosticKind, offset: usize) {
        let diag = Diagnostic::new(kind, &self.text, offset);
        log::warn!("{}", diag);
        self.out.diagnostics.push(diag);
    }

    fn push(&mut self, command: Command) {
        self.out.commands.push(command);
    }

    fn run(&mut self) {
        while self.pos < self.text.len() {
            let c = self.text[self.pos];
            match c {
                'L' | 'l' | 'O' | 'o' | 'P' | 'p' | 'T' | 't' | '<' | '>' => self.read_command(c),
                'M' | 'm' => self.read_music_mode(),
                'A'..='G' | 'a'..='g' => self.read_note(c),
                '0'..='9' => self.read_digit(c),
                ' ' => {}
                _ => self.report(DiagnosticKind::UnrecognizedSymbol, self.pos),
            }
            self.pos += 1;
        }

        if self.pending.is_some() {
            self.report(DiagnosticKind::ValueExpected, self.text.len());
            self.pending = None;
        }
    }

    fn read_command(&mut self, c: char) {
        if self.pending.is_some() {
            self.report(DiagnosticKind::CommandNotExpected, self.pos);
            return;
        }

        match c.to_ascii_uppercase() {
            'L' => self.pending = Some(Pending::Duration),
            'O' => self.pending = Some(Pending::Octave),
            'P' => self.pending = Some(Pending::Pause),
            'T' => self.pending = Some(Pending::Tempo),
            '>' => {
                self.last_octave += 1;
                self.push(Command::SetOctave(self.last_octave));
            }
            '<' => {
                self.last_octave -= 1;
                self.push(Command::SetOctave(self.last_octave));
            }
            _ => unreachable!("not a command letter: {c}"),
        }
    }

    /// `MB`/`MF` are accepted and ignored, `MN`/`ML`/`MS` set articulation
    fn read_music_mode(&mut self) {
        self.pos += 1;
        let articulation = match self.text.get(self.pos).map(char::to_ascii_uppercase) {
            Some('B') | Some('F') => return,
            Some('N') => Articulation::Normal,
            Some('L') => Articulation::Legato,
            Some('S') => Articulation::Staccato,
            Some(_) => {
                self.report(DiagnosticKind::UnrecognizedSymbol, self.pos);
                return;
            }
            None => {
                self.report(DiagnosticKind::UnrecognizedSymbol, self.pos - 1);
                return;
            }
        };
        self.push(Command::SetArticulation(articulation));
    }

    fn read_note(&mut self, c: char) {
        if self.pending.is_some() {
            self.report(DiagnosticKind::ValueExpected, self.pos);
            return;
        }

        let Some(pitch) = PitchClass::from_letter(c) else {
            return;
        };
        let mut note = Note::new(pitch);

        match self.peek(1) {
            Some('#') | Some('+') => {
                note.accidental = Accidental::Sharp;
                self.pos += 1;
            }
            Some('-') => {
                note.accidental = Accidental::Flat;
                self.pos += 1;
            }
            _ => {}
        }

        if self.peek(1) == Some('.') {
            note.dotted = true;
            self.pos += 1;
        }

        if self.peek(1).is_some_and(|n| n.is_ascii_digit()) {
            // Emitted once the length override has been read
            self.pending = Some(Pending::Note(note));
        } else {
            self.push(Command::PlayNote(note));
        }

        self.out.note_count += 1;
    }

    fn read_digit(&mut self, c: char) {
        let Some(pending) = self.pending else {
            self.report(DiagnosticKind::NumberNotExpected, self.pos);
            return;
        };

        if self.digits >= MAX_NUMBER_LENGTH {
            self.report(DiagnosticKind::NumberTooLong, self.pos);
        } else {
            self.value = self.value * 10 + c.to_digit(10).unwrap_or(0);
            self.digits += 1;
        }

        if self.peek(1).is_some_and(|n| n.is_ascii_digit()) {
            return;
        }

        let value = self.value;
        self.pending = None;
        self.digits = 0;
        self.value = 0;

        match pending {
            Pending::Duration => {
                self.last_duration = value;
                self.push(Command::SetDuration(value));
            }
            Pending::Octave => {
                self.last_octave = value as i32;
                self.push(Command::SetOctave(self.last_octave));
            }
            Pending::Tempo => self.push(Command::SetTempo(value)),
            Pending::Pause => {
                let dotted = self.peek(1) == Some('.');
                if dotted {
                    self.pos += 1;
                }
                self.out.note_count += 1;
                self.push(Command::Pause {
                    length: value,
                    dotted,
                });
            }
            Pending::Note(note) => {
                self.push(Command::SetDuration(value));
                self.push(Command::PlayNote(note));
                self.push(Command::SetDuration(self.last_duration));
            }
        }
    }
}
