use std::{iter::FusedIterator, rc::Rc};

use tracing::{debug, trace};

use crate::{
    factory::{CommonTokenFactory, TokenFactory},
    span::{ByteSpan, Position},
    stream::CharStream,
    token::{Channel, SourceId, Token, TokenOrigin, TokenType},
};

/// Anything that hands out tokens one at a time, live lexers included.
pub trait TokenSource {
    /// The next token. Once the source is exhausted this keeps returning an
    /// end of stream token.
    fn next_token(&mut self) -> Rc<Token>;

    /// Drop the token currently being recognized. Only meaningful for lexers.
    fn skip(&mut self) {}

    /// Keep the current text and extend it with the next match. Only
    /// meaningful for lexers.
    fn more(&mut self) {}

    /// Line (1-based) the source is currently at, `None` if unknown.
    fn line(&self) -> Option<usize>;

    /// Column (0-based) the source is currently at.
    fn char_position_in_line(&self) -> usize;

    fn input_stream(&self) -> Option<Rc<dyn CharStream>>;

    fn source_name(&self) -> &str;

    fn token_factory(&self) -> &Rc<dyn TokenFactory>;

    fn set_token_factory(&mut self, factory: Rc<dyn TokenFactory>);
}

/// A [`TokenSource`] over a fixed list of tokens.
///
/// Position queries report the token under the cursor. After the last token
/// they report the end of stream token, which is built lazily from the last
/// real token the first time the list runs out and cached from then on.
#[derive(Debug)]
pub struct ListTokenSource {
    tokens: Box<[Rc<Token>]>,
    idx: usize,
    eof: Option<Rc<Token>>,
    id: Rc<SourceId>,
    factory: Rc<dyn TokenFactory>,
}

impl ListTokenSource {
    pub fn new<T>(tokens: impl IntoIterator<Item = T>, name: impl Into<Box<str>>) -> Self
    where
        T: Into<Rc<Token>>,
    {
        Self::with_factory(tokens, name, Rc::new(CommonTokenFactory::default()))
    }

    pub fn with_factory<T>(
        tokens: impl IntoIterator<Item = T>,
        name: impl Into<Box<str>>,
        factory: Rc<dyn TokenFactory>,
    ) -> Self
    where
        T: Into<Rc<Token>>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            idx: 0,
            eof: None,
            id: SourceId::new(name),
            factory,
        }
    }

    /// Pull every token out of `source` up to its end of stream token and
    /// keep them for replay.
    pub fn record<S>(source: &mut S, name: impl Into<Box<str>>) -> Self
    where
        S: TokenSource + ?Sized,
    {
        let mut tokens = Vec::new();
        loop {
            let token = source.next_token();
            if token.is_eof() {
                break;
            }
            tokens.push(token);
        }
        debug!(
            "recorded {} tokens from `{}`",
            tokens.len(),
            source.source_name()
        );
        Self::new(tokens, name)
    }

    /// Iterate over the remaining tokens. The end of stream token is yielded
    /// once, as the last item.
    pub fn tokens(&mut self) -> Tokens<'_> {
        Tokens {
            source: self,
            done: false,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Index of the token the next call to [`TokenSource::next_token`]
    /// returns.
    pub fn cursor(&self) -> usize {
        self.idx
    }

    pub fn is_exhausted(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    /// The end of stream token, if it has been built yet.
    pub fn eof(&self) -> Option<&Rc<Token>> {
        self.eof.as_ref()
    }

    fn current(&self) -> Option<&Rc<Token>> {
        self.tokens.get(self.idx)
    }

    fn eof_token(&mut self) -> Rc<Token> {
        if let Some(eof) = &self.eof {
            return Rc::clone(eof);
        }
        let eof = self.make_eof();
        self.eof = Some(Rc::clone(&eof));
        eof
    }

    #[tracing::instrument(skip(self), fields(source = %self.id.name()))]
    fn make_eof(&self) -> Rc<Token> {
        let span = match self.tokens.last().and_then(|last| last.stop()) {
            Some(stop) => ByteSpan::empty_after(stop),
            None => ByteSpan::unknown(),
        };
        let position = Position::at(self.line(), self.char_position_in_line());
        let origin = TokenOrigin::new(&self.id, self.input_stream());
        let eof = self.factory.create(
            origin,
            TokenType::EOF,
            Some("EOF"),
            Channel::DEFAULT,
            span,
            position,
        );
        debug!(%span, %position, "built end of stream token");
        eof
    }
}

impl TokenSource for ListTokenSource {
    fn next_token(&mut self) -> Rc<Token> {
        let Some(token) = self.current().cloned() else {
            return self.eof_token();
        };
        trace!("{}: token {} is {token}", self.id.name(), self.idx);
        self.idx += 1;
        token
    }

    fn line(&self) -> Option<usize> {
        if let Some(token) = self.current() {
            return token.line();
        }
        if let Some(eof) = &self.eof {
            return eof.line();
        }
        // the last token may span several lines, the source is past all of them
        let last = self.tokens.last()?;
        let newlines = last.text().map_or(0, |text| text.matches('\n').count());
        last.line().map(|line| line + newlines)
    }

    fn char_position_in_line(&self) -> usize {
        if let Some(token) = self.current() {
            return token.column();
        }
        if let Some(eof) = &self.eof {
            return eof.column();
        }
        let Some(last) = self.tokens.last() else {
            return 0;
        };
        let text = last.text().unwrap_or_default();
        if !text.contains('\n') {
            // assumes the last token starts at column 0
            return text.len();
        }
        // not anchored to the last newline of the text, runtimes report it this way
        let column = i64::try_from(last.column())
            .unwrap_or(i64::MAX)
            .saturating_add(runtime_width(last.span()));
        usize::try_from(column).unwrap_or(0)
    }

    fn input_stream(&self) -> Option<Rc<dyn CharStream>> {
        let token = self
            .current()
            .or(self.eof.as_ref())
            .or(self.tokens.last())?;
        token.input_stream().cloned()
    }

    fn source_name(&self) -> &str {
        self.id.name()
    }

    fn token_factory(&self) -> &Rc<dyn TokenFactory> {
        &self.factory
    }

    fn set_token_factory(&mut self, factory: Rc<dyn TokenFactory>) {
        self.factory = factory;
    }
}

/// `stop - start + 1`, counting an unknown end as -1 the way runtimes do.
fn runtime_width(span: ByteSpan) -> i64 {
    let offset = |value: Option<usize>| {
        value.map_or(-1, |value| i64::try_from(value).unwrap_or(i64::MAX))
    };
    offset(span.stop())
        .saturating_sub(offset(span.start()))
        .saturating_add(1)
}

/// Iterator returned by [`ListTokenSource::tokens`].
#[derive(Debug)]
pub struct Tokens<'s> {
    source: &'s mut ListTokenSource,
    done: bool,
}

impl Iterator for Tokens<'_> {
    type Item = Rc<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.source.next_token();
        self.done = token.is_eof();
        Some(token)
    }
}

impl FusedIterator for Tokens<'_> {}
