//! Low-level tokenizer for the Scallop shell language.
//!
//! This crate is the standalone scanning core: it knows how to turn raw
//! script bytes into *raw lex elements* — maximal runs of characters that
//! the lex state machine assigns the same state — without deciding what a
//! caller-facing token is. The integration layer (`scallop_lexer`) merges
//! raw elements into words, separator runs, and bracket tokens.
//!
//! # Pipeline
//!
//! ```text
//! bytes -> decoded characters -> character classes -> lex states -> raw elements
//! ```
//!
//! - [`SourceBuffer`] owns a sentinel-terminated copy of the script.
//! - [`Cursor`] walks the buffer byte-by-byte with zero bounds checks.
//! - [`decode`] turns a byte window into one character, distinguishing
//!   "need more bytes" from "malformed sequence".
//! - [`classify`] maps one decoded [`Symbol`] to its [`CharClass`].
//! - [`LexState::advance`] is the transition function of the lex state
//!   machine; terminal outcomes live in [`Step`], not in [`LexState`], so
//!   advancing past end-of-input or an error does not typecheck.
//! - [`RawScanner`] drives all of the above, producing one [`RawElement`]
//!   at a time with single-character pushback between runs.
//!
//! This crate has no `scallop_*` dependencies and is safe to use from
//! external tooling.

mod class;
mod cursor;
mod decode;
mod scanner;
mod source_buffer;
mod state;

pub use class::{classify, classify_char, CharClass, Symbol, WORD_PUNCTUATION};
pub use cursor::Cursor;
pub use decode::{decode, Decode};
pub use scanner::{ErrorCause, RawElement, RawScanner};
pub use source_buffer::{LineCol, SourceBuffer};
pub use state::{LexState, RawTag, Step};
