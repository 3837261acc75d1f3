use std::fmt::Display;

/// An inclusive byte range into a character stream.
///
/// Either end may be unknown, for tokens that were manufactured rather than
/// scanned out of some input.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ByteSpan {
    start: Option<usize>,
    stop: Option<usize>,
}

impl ByteSpan {
    pub fn new(start: usize, stop: usize) -> Self {
        Self {
            start: Some(start),
            stop: Some(stop),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    /// The zero-width span directly behind a token ending at `stop`. Unknown
    /// if nothing can follow `stop`.
    pub fn empty_after(stop: usize) -> Self {
        match stop.checked_add(1) {
            Some(start) => Self::new(start, stop),
            None => Self::unknown(),
        }
    }

    pub fn start(&self) -> Option<usize> {
        self.start
    }

    pub fn stop(&self) -> Option<usize> {
        self.stop
    }

    /// Number of bytes covered, if both ends are known.
    pub fn len(&self) -> Option<usize> {
        match (self.start, self.stop) {
            (Some(start), Some(stop)) => Some((stop + 1).saturating_sub(start)),
            _ => None,
        }
    }
}

impl Display for ByteSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", Unknown(self.start), Unknown(self.stop))
    }
}

/// Line (1-based) and column (0-based) of a token.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Position {
    line: Option<usize>,
    column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line: Some(line),
            column,
        }
    }

    pub fn at(line: Option<usize>, column: usize) -> Self {
        Self { line, column }
    }

    /// A position whose line is not known. The column is still reported.
    pub fn unknown_line(column: usize) -> Self {
        Self { line: None, column }
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", Unknown(self.line), self.column)
    }
}

/// Prints unknown values as `-1`, the way runtime debug output does.
pub(crate) struct Unknown(pub(crate) Option<usize>);

impl Display for Unknown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "-1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_after_is_zero_width() {
        let span = ByteSpan::empty_after(6);
        assert_eq!(span.start(), Some(7));
        assert_eq!(span.stop(), Some(6));
        assert_eq!(span.len(), Some(0));
    }

    #[test]
    fn nothing_follows_the_last_offset() {
        assert_eq!(ByteSpan::empty_after(usize::MAX), ByteSpan::unknown());
    }

    #[test]
    fn unknown_span_has_no_length() {
        assert_eq!(ByteSpan::unknown().len(), None);
        assert_eq!(ByteSpan::unknown().to_string(), "-1:-1");
    }

    #[test]
    fn position_display() {
        assert_eq!(Position::new(3, 4).to_string(), "3:4");
        assert_eq!(Position::unknown_line(0).to_string(), "-1:0");
    }
}
