//! Merging raw lex elements into caller-facing tokens.
//!
//! Both lexing drivers -- the buffer-mode iterator and the resumable
//! streaming lexer -- feed contiguous raw elements into one
//! [`Aggregator`], which is what guarantees they produce identical token
//! sequences. The aggregator accumulates an *open run* and emits the
//! finished token whenever an incompatible element arrives:
//!
//! - word-contributing elements merge into one Word token, across quote
//!   boundaries;
//! - word separators, statement separators, and line comments merge into
//!   one separator token, promoted to StatementSeparator when the run
//!   contains a statement separator or a comment;
//! - bracket elements merge only with identical neighbouring characters
//!   (a raw `{{` run is one token), never with anything else.
//!
//! Terminal elements are the drivers' business: they close the open run
//! via [`Aggregator::take_open`] and decide how the final token looks.

use scallop_lexer_core::{LineCol, RawTag};

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Category of an open run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Run {
    /// Word-contributing elements.
    Word,
    /// Separator and comment elements. `statement` records whether the
    /// finished token is promoted to StatementSeparator.
    Separator { statement: bool },
    /// A bracket run; the tag distinguishes the four brackets.
    Bracket { tag: RawTag },
}

/// A run still being accumulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct OpenRun {
    kind: Run,
    span: Span,
    pos: Option<LineCol>,
}

impl OpenRun {
    /// Is this an open word run? Word runs interrupted by an error
    /// collapse into the error token instead of being emitted.
    pub(crate) fn is_word(&self) -> bool {
        self.kind == Run::Word
    }

    /// Start offset of the run.
    pub(crate) fn start(&self) -> u32 {
        self.span.start
    }

    /// Position of the run's first character, when tracked.
    pub(crate) fn pos(&self) -> Option<LineCol> {
        self.pos
    }

    /// Finish the run into its token.
    pub(crate) fn into_token(self) -> Token {
        let kind = match self.kind {
            Run::Word => TokenKind::Word,
            Run::Separator { statement: true } => TokenKind::StatementSeparator,
            Run::Separator { statement: false } => TokenKind::WordSeparator,
            Run::Bracket { tag } => bracket_kind(tag),
        };
        Token {
            kind,
            span: self.span,
            pos: self.pos,
        }
    }
}

/// Merges contiguous raw elements into tokens.
///
/// `Copy`, so it lives inside cursor values and snapshots with them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Aggregator {
    run: Option<OpenRun>,
}

impl Aggregator {
    /// Feed one non-terminal element.
    ///
    /// Returns the finished token when `tag` cannot extend the open run;
    /// the element itself always becomes (part of) the new open run.
    /// Elements must be contiguous: `span.start` equals the open run's
    /// end.
    pub(crate) fn feed(&mut self, tag: RawTag, span: Span, pos: Option<LineCol>) -> Option<Token> {
        debug_assert!(!tag.is_terminal(), "terminal element fed to aggregator");
        let incoming = category(tag);

        if let Some(open) = &mut self.run {
            debug_assert!(open.span.end == span.start, "non-contiguous element");
            match (open.kind, incoming) {
                (Run::Word, Run::Word) => {
                    open.span.end = span.end;
                    return None;
                }
                (Run::Separator { statement }, Run::Separator { statement: more }) => {
                    open.kind = Run::Separator {
                        statement: statement || more,
                    };
                    open.span.end = span.end;
                    return None;
                }
                (Run::Bracket { tag: open_tag }, Run::Bracket { tag: new_tag })
                    if open_tag == new_tag =>
                {
                    open.span.end = span.end;
                    return None;
                }
                _ => {}
            }
        }

        let finished = self.run.take().map(OpenRun::into_token);
        self.run = Some(OpenRun {
            kind: incoming,
            span,
            pos,
        });
        finished
    }

    /// Close and return the open run, if any.
    pub(crate) fn take_open(&mut self) -> Option<OpenRun> {
        self.run.take()
    }
}

fn bracket_kind(tag: RawTag) -> TokenKind {
    match tag {
        RawTag::OpenCurly => TokenKind::OpenCurlyBracket,
        RawTag::CloseCurly => TokenKind::CloseCurlyBracket,
        RawTag::OpenSquare => TokenKind::OpenSquareBracket,
        RawTag::CloseSquare => TokenKind::CloseSquareBracket,
        // Only bracket tags form bracket runs; see `category`.
        _ => TokenKind::Error,
    }
}

fn category(tag: RawTag) -> Run {
    if tag.is_word_contributing() {
        return Run::Word;
    }
    match tag {
        RawTag::WordSeparator => Run::Separator { statement: false },
        // A comment can only end in a line break or end-of-input, so it
        // always terminates the statement it trails.
        RawTag::StatementSeparator | RawTag::LineComment => Run::Separator { statement: true },
        _ => Run::Bracket { tag },
    }
}
