//! Word normalization: from a Word token's span to its literal value.
//!
//! A merged Word token still contains its quote delimiters and escape
//! markers. Normalization re-walks the span with the same classifier and
//! state machine that lexed it and keeps only the characters that are
//! word *content*: plain word characters, quoted content, and the
//! characters protected by an escape. The delimiters and the escape
//! markers themselves are dropped.
//!
//! ```
//! use scallop_lexer::{lex, normalize_word, TokenKind};
//!
//! let script = br#""Hello, "'world'\!"#;
//! let lexed = lex(script);
//! assert_eq!(lexed.tokens[0].kind, TokenKind::Word);
//! let literal = normalize_word(script, lexed.tokens[0].span);
//! assert_eq!(literal.as_deref(), Ok("Hello, world!"));
//! ```

use scallop_lexer_core::{decode, Decode, LexState, Step, Symbol};

use crate::span::Span;

/// Why a word could not be normalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// A malformed UTF-8 sequence inside the span.
    #[error("malformed UTF-8 sequence at byte {offset}")]
    InvalidUtf8 {
        /// Byte offset of the malformed sequence.
        offset: u32,
    },
    /// The span contains something other than word content; it was not
    /// produced by a Word token.
    #[error("not word content at byte {offset}")]
    NotAWord {
        /// Byte offset of the first non-word character.
        offset: u32,
    },
    /// The output buffer filled up. Distinct from the decode errors so
    /// callers can retry with a larger buffer.
    #[error("output buffer full after {written} bytes")]
    Overflow {
        /// Bytes successfully written before the overflow.
        written: usize,
    },
}

/// Walk `span`, invoking `keep` for every character that is word content
/// (not quote or escape decoration).
fn each_literal_char(
    script: &[u8],
    span: Span,
    mut keep: impl FnMut(char, &[u8]) -> Result<(), NormalizeError>,
) -> Result<(), NormalizeError> {
    let end = (span.end as usize).min(script.len());
    let mut offset = span.start as usize;
    let mut state = LexState::Begin;

    while offset < end {
        let window = &script[offset..end];
        let Decode::Char { c, len } = decode(window, true) else {
            return Err(NormalizeError::InvalidUtf8 {
                offset: u32::try_from(offset).unwrap_or(u32::MAX),
            });
        };
        let width = usize::from(len);
        let at = u32::try_from(offset).unwrap_or(u32::MAX);

        let next = match state.advance(Symbol::Char(c)) {
            Step::Next(next) if next.tag().is_word_contributing() => next,
            _ => return Err(NormalizeError::NotAWord { offset: at }),
        };
        if !next.tag().is_decoration() {
            keep(c, &window[..width])?;
        }
        state = next;
        offset += width;
    }

    Ok(())
}

/// Normalize a Word token's span into `out`.
///
/// Returns the number of bytes written. Fails with
/// [`NormalizeError::Overflow`] when `out` is too small; the error
/// carries how many bytes were written before capacity ran out.
pub fn normalize_word_into(
    script: &[u8],
    span: Span,
    out: &mut [u8],
) -> Result<usize, NormalizeError> {
    let mut written = 0usize;
    each_literal_char(script, span, |_c, bytes| {
        let Some(target) = out.get_mut(written..written + bytes.len()) else {
            return Err(NormalizeError::Overflow { written });
        };
        target.copy_from_slice(bytes);
        written += bytes.len();
        Ok(())
    })?;
    Ok(written)
}

/// Normalize a Word token's span into an owned string.
pub fn normalize_word(script: &[u8], span: Span) -> Result<String, NormalizeError> {
    let mut literal = String::with_capacity(span.len() as usize);
    each_literal_char(script, span, |c, _bytes| {
        literal.push(c);
        Ok(())
    })?;
    Ok(literal)
}
