//! Token stream API for the Scallop shell language.
//!
//! This crate turns a script into the token sequence the parser
//! consumes: words, separator runs, brackets, and exactly one
//! end-of-input or error token. It builds on `scallop_lexer_core`, which
//! owns the character classifier, the lex state machine, and the raw
//! scanner; this layer merges raw elements into caller-facing tokens.
//!
//! # Lexing a buffer
//!
//! ```
//! use scallop_lexer::{lex, TokenKind};
//!
//! let lexed = lex(b"greet 'big world'; exit");
//! let kinds: Vec<TokenKind> = lexed.tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Word,
//!         TokenKind::WordSeparator,
//!         TokenKind::Word,
//!         TokenKind::StatementSeparator,
//!         TokenKind::Word,
//!         TokenKind::EndOfInput,
//!     ]
//! );
//! ```
//!
//! # Lexing a source that can block
//!
//! A [`ByteSource`] may report [`Read::NotReady`]; the streaming lexer
//! then suspends into a plain [`StreamCursor`] value and resumes exactly
//! where it stopped:
//!
//! ```no_run
//! use scallop_lexer::{ByteSource, Read, StreamCursor, StreamStep};
//!
//! struct Empty;
//! impl ByteSource for Empty {
//!     fn read_at(&mut self, _offset: u32, _buf: &mut [u8]) -> Read {
//!         Read::Eof
//!     }
//! }
//!
//! let mut source = Empty;
//! let mut cursor = StreamCursor::new();
//! loop {
//!     match cursor.next_token(&mut source) {
//!         StreamStep::Token { token, cursor: next } => {
//!             println!("{:?} {:?}", token.kind, token.span);
//!             cursor = next;
//!         }
//!         // Retry policy belongs to the caller.
//!         StreamStep::NotReady { cursor: same } => cursor = same,
//!         StreamStep::End { .. } => break,
//!         StreamStep::Failed { token: _, error } => {
//!             eprintln!("{error}");
//!             break;
//!         }
//!     }
//! }
//! ```

mod aggregate;
mod lex_error;
mod lexer;
mod normalize;
mod span;
mod stream;
mod token;

pub use lex_error::{LexError, LexErrorKind};
pub use lexer::{lex, Lexed, Lexer};
pub use normalize::{normalize_word, normalize_word_into, NormalizeError};
pub use span::Span;
pub use stream::{ByteSource, Read, StreamCursor, StreamStep};
pub use token::{Token, TokenKind};

// The core types that appear in this crate's public API.
pub use scallop_lexer_core::{LineCol, SourceBuffer};
