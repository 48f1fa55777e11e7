//! Buffer-mode lexing over an in-memory script.
//!
//! [`Lexer`] drives the core raw scanner through the aggregator and
//! yields one [`Token`] at a time. The lexer value is [`Copy`] and holds
//! *all* engine state: snapshot it after any token and both copies
//! produce the identical remaining sequence. The iterator fuses after
//! the terminal token (EndOfInput or Error), so a finished lexer cannot
//! be advanced further.

use scallop_lexer_core::{RawScanner, RawTag, SourceBuffer};

use crate::aggregate::Aggregator;
use crate::lex_error::LexError;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Pull-mode lexer over a [`SourceBuffer`].
#[derive(Clone, Copy, Debug)]
pub struct Lexer<'a> {
    scanner: RawScanner<'a>,
    agg: Aggregator,
    /// A token produced together with the previous one (the terminal
    /// token that closed an open run).
    queued: Option<Token>,
    error: Option<LexError>,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer at the start of the script.
    pub fn new(source: &'a SourceBuffer) -> Self {
        Self {
            scanner: RawScanner::new(source.cursor()),
            agg: Aggregator::default(),
            queued: None,
            error: None,
            done: false,
        }
    }

    /// Create a lexer continuing right after a previously returned
    /// token.
    ///
    /// Token boundaries are always in the default lexing context, so the
    /// resumed lexer reproduces the original remaining sequence exactly.
    pub fn resume_after(source: &'a SourceBuffer, token: &Token) -> Self {
        let mut scanner = RawScanner::new(source.cursor());
        scanner.skip_to(token.span.end);
        Self {
            scanner,
            agg: Aggregator::default(),
            queued: None,
            error: None,
            done: token.kind.is_terminal(),
        }
    }

    /// The error behind an `Error` token, once one has been produced.
    pub fn error(&self) -> Option<LexError> {
        self.error
    }

    fn deliver(&mut self, token: Token) -> Token {
        if token.kind.is_terminal() {
            self.done = true;
        }
        token
    }

    fn record_error(&mut self) {
        let error = self.scanner.error_cause().map(LexError::from);
        if let Some(error) = &error {
            tracing::debug!(start = error.span.start, kind = %error.kind, "lex error");
        }
        self.error = error;
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        if let Some(token) = self.queued.take() {
            return Some(self.deliver(token));
        }

        while let Some(element) = self.scanner.next_element() {
            let end = self.scanner.pos();
            let span = Span::new(end - element.len, end);

            match element.tag {
                RawTag::End => {
                    let eof = Token::new(TokenKind::EndOfInput, span);
                    if let Some(open) = self.agg.take_open() {
                        self.queued = Some(eof);
                        return Some(open.into_token());
                    }
                    return Some(self.deliver(eof));
                }
                RawTag::Unexpected => {
                    self.record_error();
                    // An interrupted word run collapses into the error
                    // token; a completed separator or bracket run is
                    // still delivered first.
                    return match self.agg.take_open() {
                        Some(open) if open.is_word() => {
                            let token =
                                Token::new(TokenKind::Error, Span::new(open.start(), span.start));
                            Some(self.deliver(token))
                        }
                        Some(open) => {
                            self.queued = Some(Token::new(TokenKind::Error, span));
                            Some(open.into_token())
                        }
                        None => Some(self.deliver(Token::new(TokenKind::Error, span))),
                    };
                }
                tag => {
                    if let Some(token) = self.agg.feed(tag, span, None) {
                        return Some(token);
                    }
                }
            }
        }

        None
    }
}

/// A fully lexed script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lexed {
    /// All tokens, ending with exactly one EndOfInput or Error token.
    pub tokens: Vec<Token>,
    /// The error behind a final Error token.
    pub error: Option<LexError>,
}

/// Lex a whole script at once.
pub fn lex(source: &[u8]) -> Lexed {
    let buf = SourceBuffer::new(source);
    let mut lexer = Lexer::new(&buf);
    let mut tokens = Vec::new();
    for token in &mut lexer {
        tokens.push(token);
    }
    Lexed {
        tokens,
        error: lexer.error(),
    }
}

#[cfg(test)]
mod tests;
