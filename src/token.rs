use std::{
    fmt::Display,
    rc::{Rc, Weak},
};

use crate::{
    span::{ByteSpan, Position, Unknown},
    stream::CharStream,
};

/// Type tag of a token. Grammars number their own token types from 1 up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TokenType(pub i32);

impl TokenType {
    pub const EOF: TokenType = TokenType(-1);
    pub const INVALID: TokenType = TokenType(0);
}

impl Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The lane a token travels on. Parsers only look at [`Channel::DEFAULT`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Channel(pub usize);

impl Channel {
    pub const DEFAULT: Channel = Channel(0);
    pub const HIDDEN: Channel = Channel(1);
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a token source, shared with the tokens it creates.
#[derive(Debug)]
pub struct SourceId {
    name: Box<str>,
}

impl SourceId {
    pub fn new(name: impl Into<Box<str>>) -> Rc<Self> {
        Rc::new(Self { name: name.into() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Where a token came from: the source that made it and the stream it
/// points into.
///
/// The source is held weakly, a token never keeps its source alive.
#[derive(derive_more::Debug, Clone, Default)]
pub struct TokenOrigin {
    source: Weak<SourceId>,
    #[debug(skip)]
    stream: Option<Rc<dyn CharStream>>,
}

impl TokenOrigin {
    pub fn new(source: &Rc<SourceId>, stream: Option<Rc<dyn CharStream>>) -> Self {
        Self {
            source: Rc::downgrade(source),
            stream,
        }
    }

    /// An origin with no source, only a stream.
    pub fn from_stream(stream: Rc<dyn CharStream>) -> Self {
        Self {
            source: Weak::new(),
            stream: Some(stream),
        }
    }

    pub fn source(&self) -> Option<Rc<SourceId>> {
        self.source.upgrade()
    }

    pub fn stream(&self) -> Option<&Rc<dyn CharStream>> {
        self.stream.as_ref()
    }
}

/// An immutable lexical unit.
///
/// Built once, through [`Token::new`] and the `with_*` methods or through a
/// [`TokenFactory`](crate::factory::TokenFactory), and shared as `Rc<Token>`
/// afterwards.
#[derive(Debug, Clone)]
pub struct Token {
    token_type: TokenType,
    channel: Channel,
    text: Option<Box<str>>,
    span: ByteSpan,
    position: Position,
    index: Option<usize>,
    origin: TokenOrigin,
}

impl Token {
    pub fn new(token_type: TokenType, text: Option<&str>) -> Self {
        Self {
            token_type,
            channel: Channel::DEFAULT,
            text: text.map(Into::into),
            span: ByteSpan::unknown(),
            position: Position::unknown_line(0),
            index: None,
            origin: TokenOrigin::default(),
        }
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_span(mut self, span: ByteSpan) -> Self {
        self.span = span;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_origin(mut self, origin: TokenOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::EOF
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The explicit text of this token, or else the text its span covers in
    /// its stream.
    pub fn text(&self) -> Option<&str> {
        if let Some(text) = self.text.as_deref() {
            return Some(text);
        }
        self.input_stream()?.text(self.span).ok()
    }

    pub fn span(&self) -> ByteSpan {
        self.span
    }

    pub fn start(&self) -> Option<usize> {
        self.span.start()
    }

    pub fn stop(&self) -> Option<usize> {
        self.span.stop()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn line(&self) -> Option<usize> {
        self.position.line()
    }

    pub fn column(&self) -> usize {
        self.position.column()
    }

    /// Index of this token in a buffered token stream, if it has been placed
    /// in one.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn origin(&self) -> &TokenOrigin {
        &self.origin
    }

    pub fn input_stream(&self) -> Option<&Rc<dyn CharStream>> {
        self.origin.stream()
    }

    /// Name of the token source that produced this token, while that source
    /// is still alive.
    pub fn source_name(&self) -> Option<Box<str>> {
        self.origin.source().map(|source| source.name().into())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self.text() {
            Some(text) => text
                .replace('\n', "\\n")
                .replace('\r', "\\r")
                .replace('\t', "\\t"),
            None => "<no text>".to_owned(),
        };
        write!(f, "[@{},{}='{text}',<{}>", Unknown(self.index), self.span, self.token_type)?;
        if self.channel != Channel::DEFAULT {
            write!(f, ",channel={}", self.channel)?;
        }
        write!(f, ",{}]", self.position)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::stream::InputStream;

    #[test]
    fn text_falls_back_to_stream() {
        let stream: Rc<dyn CharStream> = Rc::new(InputStream::new("in", "let x"));
        let token = Token::new(TokenType(3), None)
            .with_span(ByteSpan::new(4, 4))
            .with_origin(TokenOrigin::from_stream(stream));
        assert_eq!(token.text(), Some("x"));
    }

    #[test]
    fn explicit_text_wins() {
        let stream: Rc<dyn CharStream> = Rc::new(InputStream::new("in", "let x"));
        let token = Token::new(TokenType(3), Some("y"))
            .with_span(ByteSpan::new(4, 4))
            .with_origin(TokenOrigin::from_stream(stream));
        assert_eq!(token.text(), Some("y"));
    }

    #[test]
    fn source_name_follows_source_lifetime() {
        let source = SourceId::new("unit");
        let token = Token::new(TokenType(1), Some("a"))
            .with_origin(TokenOrigin::new(&source, None));
        assert_eq!(token.source_name().as_deref(), Some("unit"));
        drop(source);
        assert_eq!(token.source_name(), None);
    }

    #[test]
    fn display_matches_runtime_format() {
        let token = Token::new(TokenType(5), Some("a\nb"))
            .with_span(ByteSpan::new(0, 2))
            .with_position(Position::new(1, 0))
            .with_index(0);
        assert_eq!(token.to_string(), "[@0,0:2='a\\nb',<5>,1:0]");

        let hidden = Token::new(TokenType(2), Some(" ")).with_channel(Channel::HIDDEN);
        assert_eq!(hidden.to_string(), "[@-1,-1:-1=' ',<2>,channel=1,-1:0]");
    }
}
