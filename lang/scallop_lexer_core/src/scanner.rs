//! Pull-mode raw scanner producing maximal identical-state runs.
//!
//! The scanner repeatedly decodes one character, advances the lex state
//! machine, and groups consecutive characters that enter the same state
//! into one [`RawElement`]. The character that breaks a run is *not*
//! consumed -- it stays under the cursor and seeds the next element, which
//! is the single character of pushback the lexing contract allows.
//!
//! Terminal outcomes produce one-shot elements: end of input yields a
//! final one-byte `End` element (the virtual byte just past the script),
//! and a lex error yields a zero-length `Unexpected` element at the
//! offending offset, with the precise [`ErrorCause`] recorded for the
//! integration layer.
//!
//! The scanner is [`Copy`]: snapshot it at any element boundary and the
//! snapshot replays the identical remaining element sequence.

use crate::class::Symbol;
use crate::cursor::Cursor;
use crate::decode::{decode, Decode};
use crate::state::{LexState, RawTag, Step};

/// One raw lex element: a maximal run of same-state characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawElement {
    /// The state every character of the run entered.
    pub tag: RawTag,
    /// Length of the run in bytes. Zero only for `Unexpected`; one for
    /// `End` (the virtual byte past the script).
    pub len: u32,
}

/// Why the scanner produced an `Unexpected` element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCause {
    /// A malformed byte sequence at `offset`.
    InvalidUtf8 {
        /// Byte offset of the malformed sequence.
        offset: u32,
    },
    /// A character with no valid transition from the current state.
    UnexpectedCharacter {
        /// Byte offset of the character.
        offset: u32,
        /// The offending character.
        found: char,
    },
    /// End of input where the current state requires more characters
    /// (inside a quote, or directly after an escape).
    UnexpectedEndOfInput {
        /// Byte offset of the end of input.
        offset: u32,
        /// The state the end of input interrupted.
        state: LexState,
    },
}

/// Pure, allocation-free raw scanner.
///
/// Produces one [`RawElement`] at a time; also usable as an
/// [`Iterator`]. After the terminal element (`End` or `Unexpected`) the
/// scanner is exhausted and yields `None`.
#[derive(Clone, Copy, Debug)]
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    /// Machine state after the last consumed character.
    state: LexState,
    /// Set once the terminal element has been produced.
    done: bool,
    /// Cause of the `Unexpected` element, if one was produced.
    cause: Option<ErrorCause>,
}

impl<'a> RawScanner<'a> {
    /// Create a scanner from a cursor, starting in `Begin`.
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self {
            cursor,
            state: LexState::Begin,
            done: false,
            cause: None,
        }
    }

    /// Current byte offset: the end of the last produced element.
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Cause of the `Unexpected` element, once one has been produced.
    pub fn error_cause(&self) -> Option<ErrorCause> {
        self.cause
    }

    /// Reposition a fresh scanner at an element boundary.
    ///
    /// Element boundaries sit in the default lexing context, so scanning
    /// resumes in `Begin` and reproduces the original remaining element
    /// sequence. Offsets inside a quoted string or comment do not
    /// satisfy that contract.
    pub fn skip_to(&mut self, offset: u32) {
        debug_assert!(
            self.cursor.pos() <= offset,
            "skip_to may only move forward"
        );
        let delta = offset.saturating_sub(self.cursor.pos());
        self.cursor.advance_n(delta);
    }

    /// Produce the next raw element, or `None` after the terminal one.
    pub fn next_element(&mut self) -> Option<RawElement> {
        if self.done {
            return None;
        }

        let start = self.cursor.pos();
        let mut run: Option<RawTag> = None;

        loop {
            let offset = self.cursor.pos();
            let (symbol, width) = match decode(self.cursor.window(), true) {
                Decode::Char { c, len } => (Symbol::Char(c), u32::from(len)),
                Decode::EndOfInput => (Symbol::EndOfInput, 1),
                // The whole script is in the window, so a trailing
                // partial sequence already surfaced as Invalid.
                Decode::Invalid | Decode::Incomplete => (Symbol::Invalid, 0),
            };

            match self.state.advance(symbol) {
                Step::Next(next) => {
                    let tag = next.tag();
                    if let Some(current) = run {
                        if current != tag {
                            // The breaking character stays unconsumed and
                            // seeds the next element.
                            return Some(RawElement {
                                tag: current,
                                len: offset - start,
                            });
                        }
                    }
                    run = Some(tag);
                    self.state = next;
                    self.cursor.advance_n(width);
                    self.fast_forward(next);
                }
                Step::End => {
                    if let Some(current) = run {
                        return Some(RawElement {
                            tag: current,
                            len: offset - start,
                        });
                    }
                    self.done = true;
                    // The end-of-input element occupies the virtual byte
                    // just past the script, keeping token spans gap-free.
                    self.cursor.advance();
                    return Some(RawElement {
                        tag: RawTag::End,
                        len: 1,
                    });
                }
                Step::Unexpected => {
                    self.cause = Some(match symbol {
                        Symbol::Invalid => ErrorCause::InvalidUtf8 { offset },
                        Symbol::Char(found) => ErrorCause::UnexpectedCharacter { offset, found },
                        Symbol::EndOfInput => ErrorCause::UnexpectedEndOfInput {
                            offset,
                            state: self.state,
                        },
                    });
                    if let Some(current) = run {
                        // Deliver the finished run; the error re-surfaces
                        // on the next call.
                        return Some(RawElement {
                            tag: current,
                            len: offset - start,
                        });
                    }
                    self.done = true;
                    return Some(RawElement {
                        tag: RawTag::Unexpected,
                        len: 0,
                    });
                }
            }
        }
    }

    /// Extend the current run over ASCII bytes that provably re-enter
    /// `state`, skipping the decoder for the common all-ASCII case.
    ///
    /// Every predicate rejects `0x00` (sentinel and interior nulls) and
    /// all non-ASCII lead bytes, which fall back to the decoding path.
    fn fast_forward(&mut self, state: LexState) {
        match state {
            LexState::Word => self.cursor.eat_while(is_ascii_word_byte),
            LexState::WordSeparator => self.cursor.eat_while(|b| b == b' ' || b == b'\t'),
            LexState::SingleQuoteWord => self
                .cursor
                .eat_while(|b| is_plain_ascii(b) && b != b'\''),
            LexState::DoubleQuoteWord => self
                .cursor
                .eat_while(|b| is_plain_ascii(b) && b != b'"'),
            LexState::LineComment => self
                .cursor
                .eat_while(|b| is_plain_ascii(b) && b != b'\r' && b != b'\n'),
            _ => {}
        }
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawElement;

    fn next(&mut self) -> Option<RawElement> {
        self.next_element()
    }
}

/// ASCII bytes that classify as word content.
fn is_ascii_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':' | b'/')
}

/// Non-null ASCII: decodes to itself and can be consumed without the
/// decoder.
fn is_plain_ascii(b: u8) -> bool {
    matches!(b, 0x01..=0x7F)
}
