//! Resumable lexing over a blocking-capable byte source.
//!
//! A [`ByteSource`] may answer a read with [`Read::NotReady`] -- "no
//! bytes available yet", distinct from EOF. When that happens mid-token,
//! [`StreamCursor::next_token`] returns [`StreamStep::NotReady`] with a
//! cursor that preserves every piece of progress: byte offset, line and
//! column, the machine state, and the partially accumulated run. Calling
//! `next_token` again once the source is ready continues exactly where
//! lexing stopped -- no consumed byte is reprocessed and no token is
//! split or duplicated relative to a non-blocking run over the same
//! bytes.
//!
//! The terminal steps ([`StreamStep::End`] and [`StreamStep::Failed`])
//! carry no cursor, so advancing past the end of the token stream does
//! not typecheck. Retry and timeout policy belong to the caller; the
//! engine is synchronous and never blocks on its own.
//!
//! Token sequences are identical to buffer-mode lexing because both
//! drivers share the same aggregator; streaming tokens additionally
//! carry their line/column start position.

use scallop_lexer_core::{decode, Decode, ErrorCause, LexState, LineCol, Step, Symbol};

use crate::aggregate::Aggregator;
use crate::lex_error::LexError;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// An abstract, offset-addressed byte store that may not be ready.
///
/// Implementations must be stable under re-reads: the bytes at a given
/// offset never change once they have been served. The lexer re-requests
/// at most the bytes of one undecoded character after a suspension.
pub trait ByteSource {
    /// Try to fill `buf` with bytes starting at `offset`.
    fn read_at(&mut self, offset: u32, buf: &mut [u8]) -> Read;
}

/// Outcome of one read request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Read {
    /// At least one byte was written to the front of `buf`.
    Bytes(usize),
    /// No bytes are available yet. Not an error, and not EOF: the caller
    /// should retry later.
    NotReady,
    /// There are no bytes at or after the requested offset.
    Eof,
}

/// One step of resumable lexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamStep {
    /// A finished token, and the cursor to continue from.
    Token {
        /// The finished token.
        token: Token,
        /// Continue lexing by calling [`StreamCursor::next_token`] on
        /// this.
        cursor: StreamCursor,
    },
    /// The source had no bytes yet. All progress is inside the cursor;
    /// retry the same call when the source is ready.
    NotReady {
        /// The suspended lexing state.
        cursor: StreamCursor,
    },
    /// The EndOfInput token. Terminal: there is no cursor to advance.
    End {
        /// The end-of-input token.
        token: Token,
    },
    /// An Error token and its cause. Terminal: there is no cursor to
    /// advance.
    Failed {
        /// The error token.
        token: Token,
        /// Why lexing failed.
        error: LexError,
    },
}

/// The complete state of a resumable lex, as a plain value.
///
/// `Copy`: snapshot it anywhere and both copies continue independently.
/// A zero-state cursor ([`StreamCursor::new`]) begins lexing at offset
/// zero, line 1, column 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamCursor {
    /// Offset of the next unconsumed byte.
    offset: u32,
    /// Position of the next unconsumed character.
    pos: LineCol,
    /// Machine state after the last consumed character.
    state: LexState,
    /// The partially accumulated token run.
    agg: Aggregator,
}

impl Default for StreamCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamCursor {
    /// A cursor at the start of the script.
    pub fn new() -> Self {
        Self {
            offset: 0,
            pos: LineCol::START,
            state: LexState::Begin,
            agg: Aggregator::default(),
        }
    }

    /// Offset of the next unconsumed byte.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Lex the next token from `source`.
    ///
    /// Loops internally until a token is finished, the source reports
    /// not-ready, or the script ends.
    pub fn next_token<S: ByteSource>(mut self, source: &mut S) -> StreamStep {
        loop {
            let Some((symbol, width)) = read_symbol(source, self.offset) else {
                tracing::trace!(offset = self.offset, "source not ready; suspending");
                return StreamStep::NotReady { cursor: self };
            };

            match self.state.advance(symbol) {
                Step::Next(next) => {
                    let span = Span::new(self.offset, self.offset + width);
                    let pos = self.pos;
                    self.consume(symbol, width);
                    self.state = next;
                    if let Some(token) = self.agg.feed(next.tag(), span, Some(pos)) {
                        return StreamStep::Token {
                            token,
                            cursor: self,
                        };
                    }
                }
                Step::End => {
                    // The end of input is not consumed: if an open run
                    // must be delivered first, the next call encounters
                    // it again.
                    if let Some(open) = self.agg.take_open() {
                        return StreamStep::Token {
                            token: open.into_token(),
                            cursor: self,
                        };
                    }
                    let token = Token::with_pos(
                        TokenKind::EndOfInput,
                        Span::new(self.offset, self.offset + 1),
                        self.pos,
                    );
                    return StreamStep::End { token };
                }
                Step::Unexpected => {
                    let error = LexError::from(self.error_cause(symbol));
                    match self.agg.take_open() {
                        Some(open) if open.is_word() => {
                            // The interrupted word run collapses into the
                            // error token.
                            let token = Token {
                                kind: TokenKind::Error,
                                span: Span::new(open.start(), self.offset),
                                pos: open.pos(),
                            };
                            tracing::debug!(start = token.span.start, kind = %error.kind, "lex error");
                            return StreamStep::Failed { token, error };
                        }
                        Some(open) => {
                            // Deliver the finished run; the error
                            // re-surfaces on the next call.
                            return StreamStep::Token {
                                token: open.into_token(),
                                cursor: self,
                            };
                        }
                        None => {
                            let token = Token::with_pos(
                                TokenKind::Error,
                                Span::new(self.offset, self.offset),
                                self.pos,
                            );
                            tracing::debug!(start = token.span.start, kind = %error.kind, "lex error");
                            return StreamStep::Failed { token, error };
                        }
                    }
                }
            }
        }
    }

    fn consume(&mut self, symbol: Symbol, width: u32) {
        self.offset += width;
        if let Symbol::Char(c) = symbol {
            if c == '\n' {
                self.pos.line += 1;
                self.pos.col = 1;
            } else {
                self.pos.col += 1;
            }
        }
    }

    fn error_cause(&self, symbol: Symbol) -> ErrorCause {
        match symbol {
            Symbol::Invalid => ErrorCause::InvalidUtf8 {
                offset: self.offset,
            },
            Symbol::Char(found) => ErrorCause::UnexpectedCharacter {
                offset: self.offset,
                found,
            },
            Symbol::EndOfInput => ErrorCause::UnexpectedEndOfInput {
                offset: self.offset,
                state: self.state,
            },
        }
    }
}

/// Decode one symbol at `offset`, reading at most the bytes of a single
/// character. Returns `None` when the source reports not-ready before
/// the character is complete; nothing is consumed in that case.
fn read_symbol<S: ByteSource>(source: &mut S, offset: u32) -> Option<(Symbol, u32)> {
    let mut window = [0u8; 4];
    let mut have = 0usize;
    let mut at_end = false;

    loop {
        match decode(&window[..have], at_end) {
            Decode::Char { c, len } => return Some((Symbol::Char(c), u32::from(len))),
            Decode::EndOfInput => return Some((Symbol::EndOfInput, 1)),
            Decode::Invalid => return Some((Symbol::Invalid, 0)),
            Decode::Incomplete => {
                let read_offset = offset.saturating_add(u32::try_from(have).unwrap_or(0));
                match source.read_at(read_offset, &mut window[have..]) {
                    Read::Bytes(n) if n > 0 => have = (have + n).min(window.len()),
                    // A zero-byte "success" is a not-ready in disguise.
                    Read::Bytes(_) | Read::NotReady => return None,
                    Read::Eof => at_end = true,
                }
            }
        }
    }
}
