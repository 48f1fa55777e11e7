//! Typed lexer errors.
//!
//! When lexing fails the token stream ends with a
//! [`TokenKind::Error`](crate::TokenKind::Error) token; the matching
//! `LexError` says why. The lexer performs no resynchronization -- the
//! caller stops tokenizing and reports a syntax error at the recorded
//! span.

use scallop_lexer_core::{ErrorCause, LexState};

use crate::span::Span;

/// A lexer error: where it happened and what went wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {}", .span.start)]
pub struct LexError {
    /// Location of the offending input. Zero-length when the error is
    /// the end of input itself.
    pub span: Span,
    /// What went wrong.
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    /// A malformed UTF-8 sequence. Not retried.
    #[error("malformed UTF-8 sequence")]
    InvalidUtf8,
    /// A character with no valid transition at top level.
    #[error("unexpected character {found:?}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
    },
    /// End of input inside a single-quoted string.
    #[error("unterminated single-quoted string")]
    UnterminatedSingleQuote,
    /// End of input inside a double-quoted string.
    #[error("unterminated double-quoted string")]
    UnterminatedDoubleQuote,
    /// End of input directly after an escape character.
    #[error("dangling escape at end of input")]
    DanglingEscape,
}

impl From<ErrorCause> for LexError {
    fn from(cause: ErrorCause) -> Self {
        match cause {
            ErrorCause::InvalidUtf8 { offset } => LexError {
                span: Span::new(offset, offset),
                kind: LexErrorKind::InvalidUtf8,
            },
            ErrorCause::UnexpectedCharacter { offset, found } => {
                let len = u32::try_from(found.len_utf8()).unwrap_or(4);
                LexError {
                    span: Span::new(offset, offset + len),
                    kind: LexErrorKind::UnexpectedCharacter { found },
                }
            }
            ErrorCause::UnexpectedEndOfInput { offset, state } => {
                let kind = match state {
                    LexState::SingleQuote | LexState::SingleQuoteWord => {
                        LexErrorKind::UnterminatedSingleQuote
                    }
                    LexState::DoubleQuote | LexState::DoubleQuoteWord => {
                        LexErrorKind::UnterminatedDoubleQuote
                    }
                    // Only the escape state can otherwise be interrupted
                    // by end of input.
                    _ => LexErrorKind::DanglingEscape,
                };
                LexError {
                    span: Span::new(offset, offset),
                    kind,
                }
            }
        }
    }
}
