use std::fmt::Debug;

use thiserror::Error;

use crate::span::ByteSpan;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StreamError {
    #[error("span has an unknown end")]
    UnknownSpan,
    #[error("span {start}:{stop} is outside of a stream of {len} bytes")]
    OutOfBounds {
        start: usize,
        stop: usize,
        len: usize,
    },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

pub type StreamResult<T> = Result<T, StreamError>;

/// Positioned character input that tokens can point back to.
///
/// Token sources never read from it, they only hand it on so that
/// diagnostics can trace a token to the text it came from.
pub trait CharStream: Debug {
    fn source_name(&self) -> &str;

    /// Length of the stream in bytes.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text covered by an inclusive byte span.
    fn text(&self, span: ByteSpan) -> StreamResult<&str>;
}

/// A character stream held entirely in memory.
#[derive(Debug, Clone)]
pub struct InputStream {
    name: Box<str>,
    data: Box<str>,
}

impl InputStream {
    pub fn new(name: impl Into<Box<str>>, data: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }
}

impl CharStream for InputStream {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn text(&self, span: ByteSpan) -> StreamResult<&str> {
        let (Some(start), Some(stop)) = (span.start(), span.stop()) else {
            return Err(StreamError::UnknownSpan);
        };
        // an empty span (stop == start - 1) is allowed right up to the end
        let end = stop + 1;
        if start > end || end > self.data.len() {
            return Err(StreamError::OutOfBounds {
                start,
                stop,
                len: self.data.len(),
            });
        }
        for offset in [start, end] {
            if !self.data.is_char_boundary(offset) {
                return Err(StreamError::NotCharBoundary { offset });
            }
        }
        Ok(&self.data[start..end])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn text_of_inclusive_span() {
        let stream = InputStream::new("t", "foo bar");
        assert_eq!(stream.text(ByteSpan::new(4, 6)), Ok("bar"));
        assert_eq!(stream.text(ByteSpan::new(0, 0)), Ok("f"));
    }

    #[test]
    fn empty_span_at_end() {
        let stream = InputStream::new("t", "foo");
        assert_eq!(stream.text(ByteSpan::empty_after(2)), Ok(""));
    }

    #[test]
    fn out_of_bounds() {
        let stream = InputStream::new("t", "foo");
        assert_eq!(
            stream.text(ByteSpan::new(2, 3)),
            Err(StreamError::OutOfBounds {
                start: 2,
                stop: 3,
                len: 3
            })
        );
    }

    #[test]
    fn unknown_and_split_characters() {
        let stream = InputStream::new("t", "äb");
        assert_eq!(
            stream.text(ByteSpan::unknown()),
            Err(StreamError::UnknownSpan)
        );
        assert_eq!(
            stream.text(ByteSpan::new(1, 2)),
            Err(StreamError::NotCharBoundary { offset: 1 })
        );
        assert_eq!(stream.source_name(), "t");
        assert_eq!(stream.len(), 3);
    }
}
