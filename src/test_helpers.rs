use std::rc::Rc;

use crate::{
    span::{ByteSpan, Position},
    stream::CharStream,
    token::{Token, TokenOrigin, TokenType},
};

pub(crate) const ID: TokenType = TokenType(1);

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// A default channel token at `line:column` covering `start..=stop`.
pub(crate) fn tok(text: &str, line: usize, column: usize, start: usize, stop: usize) -> Rc<Token> {
    Rc::new(
        Token::new(ID, Some(text))
            .with_span(ByteSpan::new(start, stop))
            .with_position(Position::new(line, column)),
    )
}

/// Like [`tok`], but pointing into `stream`.
pub(crate) fn tok_in(
    stream: &Rc<dyn CharStream>,
    text: &str,
    line: usize,
    column: usize,
    start: usize,
    stop: usize,
) -> Rc<Token> {
    Rc::new(
        Token::new(ID, Some(text))
            .with_span(ByteSpan::new(start, stop))
            .with_position(Position::new(line, column))
            .with_origin(TokenOrigin::from_stream(Rc::clone(stream))),
    )
}
