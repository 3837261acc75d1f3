use std::{fmt::Debug, rc::Rc};

use tracing::warn;

use crate::{
    span::{ByteSpan, Position},
    token::{Channel, Token, TokenOrigin, TokenType},
};

/// Strategy used by token sources to build the tokens they hand out.
pub trait TokenFactory: Debug {
    fn create(
        &self,
        origin: TokenOrigin,
        token_type: TokenType,
        text: Option<&str>,
        channel: Channel,
        span: ByteSpan,
        position: Position,
    ) -> Rc<Token>;
}

/// Builds plain [`Token`]s.
///
/// With `copy_text` set, tokens created without explicit text get a copy of
/// the text their span covers in the origin stream, so they no longer depend
/// on the stream for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommonTokenFactory {
    copy_text: bool,
}

impl CommonTokenFactory {
    pub fn new(copy_text: bool) -> Self {
        Self { copy_text }
    }

    pub fn copy_text(&self) -> bool {
        self.copy_text
    }
}

impl TokenFactory for CommonTokenFactory {
    fn create(
        &self,
        origin: TokenOrigin,
        token_type: TokenType,
        text: Option<&str>,
        channel: Channel,
        span: ByteSpan,
        position: Position,
    ) -> Rc<Token> {
        let copied = match (text, origin.stream()) {
            (None, Some(stream)) if self.copy_text => match stream.text(span) {
                Ok(copied) => Some(Box::<str>::from(copied)),
                Err(err) => {
                    warn!("could not copy token text from `{}`: {err}", stream.source_name());
                    None
                }
            },
            _ => None,
        };
        let text = text.or(copied.as_deref());
        Rc::new(
            Token::new(token_type, text)
                .with_channel(channel)
                .with_span(span)
                .with_position(position)
                .with_origin(origin),
        )
    }
}
