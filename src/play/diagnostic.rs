//! Syntax diagnostics reported while parsing a PLAY statement

use std::fmt;

/// Widest excerpt of the statement shown with a diagnostic
pub const MAX_EXCERPT: usize = 80;

/// Characters kept on each side of the offset when the statement is clipped
const HALF_EXCERPT: usize = MAX_EXCERPT / 2;

const ELLIPSIS: [char; 3] = ['.'; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Character that has no meaning in a PLAY statement
    UnrecognizedSymbol,
    /// Command letter while another command still waits for its value
    CommandNotExpected,
    /// Note letter (or end of input) while a command waits for its value
    ValueExpected,
    /// Digit with no command to attach to
    NumberNotExpected,
    /// Digit beyond the maximum operand length; it is dropped
    NumberTooLong,
}

impl DiagnosticKind {
    pub fn message(self) -> &'static str {
        match self {
            Self::UnrecognizedSymbol => "Symbol not expected:",
            Self::CommandNotExpected => "Command not expected:",
            Self::ValueExpected => "Value expected here:",
            Self::NumberNotExpected => "Number not expected:",
            Self::NumberTooLong => "Numbers too big (number will be truncated):",
        }
    }
}

/// A recoverable syntax error with the surrounding statement text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Character offset into the statement
    pub offset: usize,
    /// Statement window, at most [`MAX_EXCERPT`] characters
    pub excerpt: String,
    /// Offset of the offending character inside `excerpt`
    pub column: usize,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, text: &[char], offset: usize) -> Self {
        let len = text.len();
        if len <= MAX_EXCERPT {
            return Self {
                kind,
                offset,
                excerpt: text.iter().collect(),
                column: offset,
            };
        }

        let (start, column, clip_left, clip_right) = if offset < HALF_EXCERPT {
            (0, offset, false, true)
        } else if offset > len - HALF_EXCERPT {
            let start = len - MAX_EXCERPT;
            (start, offset - start, true, false)
        } else {
            (offset - HALF_EXCERPT, HALF_EXCERPT, true, true)
        };

        let mut window = text[start..start + MAX_EXCERPT].to_vec();
        if clip_left {
            window[..3].copy_from_slice(&ELLIPSIS);
        }
        if clip_right {
            window[MAX_EXCERPT - 3..].copy_from_slice(&ELLIPSIS);
        }

        Self {
            kind,
            offset,
            excerpt: window.into_iter().collect(),
            column,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Syntax Error: {}", self.kind.message())?;
        writeln!(f, "\"{}\"", self.excerpt)?;
        // One extra column for the opening quote
        write!(f, "{}^", " ".repeat(self.column + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_short_statement_is_shown_whole() {
        let diag = Diagnostic::new(DiagnosticKind::UnrecognizedSymbol, &chars("cdZe"), 2);
        assert_eq!(diag.excerpt, "cdZe");
        assert_eq!(diag.column, 2);
        assert_eq!(diag.to_string(), "Syntax Error: Symbol not expected:\n\"cdZe\"\n   ^");
    }

    #[test]
    fn test_long_statement_clipped_at_head() {
        let text = chars(&"c".repeat(200));
        let diag = Diagnostic::new(DiagnosticKind::NumberNotExpected, &text, 10);
        assert_eq!(diag.excerpt.chars().count(), MAX_EXCERPT);
        assert!(diag.excerpt.ends_with("..."));
        assert!(!diag.excerpt.starts_with("..."));
        assert_eq!(diag.column, 10);
    }

    #[test]
    fn test_long_statement_clipped_at_tail() {
        let text = chars(&"c".repeat(200));
        let diag = Diagnostic::new(DiagnosticKind::NumberNotExpected, &text, 190);
        assert!(diag.excerpt.starts_with("..."));
        assert!(!diag.excerpt.ends_with("..."));
        assert_eq!(diag.column, 70);
    }

    #[test]
    fn test_long_statement_clipped_around_offset() {
        let mut s = "c".repeat(100);
        s.push('Z');
        s.push_str(&"d".repeat(100));
        let diag = Diagnostic::new(DiagnosticKind::UnrecognizedSymbol, &chars(&s), 100);
        assert!(diag.excerpt.starts_with("..."));
        assert!(diag.excerpt.ends_with("..."));
        assert_eq!(diag.column, 40);
        assert_eq!(diag.excerpt.chars().nth(40), Some('Z'));
    }

    #[test]
    fn test_end_of_input_offset() {
        let diag = Diagnostic::new(DiagnosticKind::ValueExpected, &chars("t"), 1);
        assert_eq!(diag.column, 1);
        assert!(diag.to_string().ends_with("\n  ^"));
    }
}
