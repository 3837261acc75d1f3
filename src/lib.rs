//! Token sources that replay an already built list of tokens.
//!
//! A [`ListTokenSource`] behaves like a lexer towards a parser, but its tokens
//! come from somewhere else: a rewrite pass, a template, a test fixture. Once
//! the list runs out it keeps returning one synthesized end of stream token.

pub mod factory;
pub mod span;
pub mod stream;
pub mod token;
pub mod tokensource;

#[cfg(test)]
mod test_helpers;

pub use factory::{CommonTokenFactory, TokenFactory};
pub use span::{ByteSpan, Position};
pub use stream::{CharStream, InputStream, StreamError, StreamResult};
pub use token::{Channel, SourceId, Token, TokenOrigin, TokenType};
pub use tokensource::{ListTokenSource, TokenSource, Tokens};
