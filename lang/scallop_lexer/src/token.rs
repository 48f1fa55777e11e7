//! Caller-facing tokens.
//!
//! A token is a kind plus a byte-exact span; streaming tokens also carry
//! the line/column of their first character. Word tokens cover entire
//! word runs including quote and escape decoration -- `foo"bar"baz` is a
//! single Word. Separator tokens cover maximal separator runs, promoted
//! to `StatementSeparator` when the run contains one.

use scallop_lexer_core::LineCol;

use crate::span::Span;

/// The kind of a lexed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenKind {
    /// A word, including any quoted or escaped segments.
    Word,
    /// A run of spaces and tabs.
    WordSeparator,
    /// A separator run containing at least one `;`, CR, LF, or line
    /// comment.
    StatementSeparator,
    /// `{`.
    OpenCurlyBracket,
    /// `}`.
    CloseCurlyBracket,
    /// `[`.
    OpenSquareBracket,
    /// `]`.
    CloseSquareBracket,
    /// End of the script. Terminal; spans the virtual byte past the end.
    EndOfInput,
    /// A lex error. Terminal; see [`LexError`](crate::LexError) for the
    /// cause.
    Error,
    /// Reserved for the grammar; never produced by the lexer.
    AssignmentOperator,
    /// Reserved for the grammar; never produced by the lexer.
    Pipe,
    /// Reserved for the grammar; never produced by the lexer.
    BinaryPipe,
}

impl TokenKind {
    /// Terminal kinds end the token stream; nothing follows them.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::EndOfInput | Self::Error)
    }
}

/// A single lexed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// What was lexed.
    pub kind: TokenKind,
    /// Where it is in the script, byte-exact.
    pub span: Span,
    /// Line/column of the first character. Filled by the streaming
    /// lexer; buffer-mode callers use
    /// [`SourceBuffer::line_col`](scallop_lexer_core::SourceBuffer::line_col)
    /// on demand.
    pub pos: Option<LineCol>,
}

impl Token {
    /// A token without position information.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            pos: None,
        }
    }

    /// A token with its line/column position.
    pub fn with_pos(kind: TokenKind, span: Span, pos: LineCol) -> Self {
        Self {
            kind,
            span,
            pos: Some(pos),
        }
    }
}
