//! Incremental UTF-8 decoding over byte windows.
//!
//! The decoder looks at a window of not-yet-consumed bytes and produces
//! exactly one character, reporting how many bytes it occupied. Two
//! failure modes are kept strictly apart:
//!
//! - [`Decode::Incomplete`]: the window ends in the middle of a sequence
//!   that could still be completed. Only a streaming caller sees this;
//!   it supplies a longer window starting at the *same* offset and
//!   retries. UTF-8 carries no decoder shift state, so retrying from the
//!   character start is the whole resumption contract.
//! - [`Decode::Invalid`]: the bytes can never form a character. This is a
//!   hard error at the window's start offset and is not retried.
//!
//! An empty window at end of input is neither: it decodes to the
//! distinguished [`Decode::EndOfInput`] character.

/// Result of decoding one character from a byte window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decode {
    /// One decoded character and the number of bytes it consumed.
    Char {
        /// The decoded scalar value.
        c: char,
        /// Bytes consumed from the window (1..=4).
        len: u8,
    },
    /// The window is empty and the input has ended.
    EndOfInput,
    /// The window ends mid-sequence; supply more bytes and retry.
    Incomplete,
    /// Malformed sequence. Unrecoverable for the current lex attempt.
    Invalid,
}

/// Valid range for the second byte of a multibyte sequence, keyed on the
/// lead byte. Encodes the RFC 3629 restrictions that reject overlong
/// forms (`E0`, `F0`), surrogates (`ED`), and scalars above U+10FFFF
/// (`F4`).
fn second_byte_range(lead: u8) -> std::ops::RangeInclusive<u8> {
    match lead {
        0xE0 => 0xA0..=0xBF,
        0xED => 0x80..=0x9F,
        0xF0 => 0x90..=0xBF,
        0xF4 => 0x80..=0x8F,
        _ => 0x80..=0xBF,
    }
}

/// Decode one character from the front of `window`.
///
/// `at_end` declares whether the window's end is the true end of input.
/// With `at_end` set, a trailing partial sequence is [`Decode::Invalid`]
/// (there is nothing left that could complete it) and an empty window is
/// [`Decode::EndOfInput`]. Without it, both report
/// [`Decode::Incomplete`] so a streaming caller can wait for more bytes.
///
/// Buffer-oriented callers always pass `at_end = true`.
pub fn decode(window: &[u8], at_end: bool) -> Decode {
    let Some(&lead) = window.first() else {
        return if at_end {
            Decode::EndOfInput
        } else {
            Decode::Incomplete
        };
    };

    if lead < 0x80 {
        return Decode::Char {
            c: char::from(lead),
            len: 1,
        };
    }

    // Lead bytes 0x80..=0xC1 are continuations or overlong two-byte
    // forms; 0xF5..=0xFF encode scalars above U+10FFFF.
    let len = match lead {
        0xC2..=0xDF => 2u8,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => return Decode::Invalid,
    };

    let mut value = u32::from(lead & (0x7F >> len));
    for i in 1..usize::from(len) {
        let Some(&byte) = window.get(i) else {
            // The sequence so far is well-formed but unfinished.
            return if at_end {
                Decode::Invalid
            } else {
                Decode::Incomplete
            };
        };
        let valid = if i == 1 {
            second_byte_range(lead).contains(&byte)
        } else {
            (0x80..=0xBF).contains(&byte)
        };
        if !valid {
            return Decode::Invalid;
        }
        value = (value << 6) | u32::from(byte & 0x3F);
    }

    // The byte-range checks above guarantee a valid scalar; the fallback
    // keeps the conversion total without a panic path.
    match char::from_u32(value) {
        Some(c) => Decode::Char { c, len },
        None => Decode::Invalid,
    }
}
