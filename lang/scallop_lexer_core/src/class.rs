//! Character classification.
//!
//! Maps one decoded input symbol to its semantic class. The classifier is
//! a pure, total function: every character, plus the end-of-input and
//! decode-error sentinels, has exactly one class.

/// One fully decoded input symbol.
///
/// The lex state machine consumes symbols, not bytes: a symbol is either
/// a character, the end-of-input sentinel, or the decode-error sentinel.
/// The "need more bytes" condition of a streaming source never becomes a
/// symbol; it suspends the scan instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// A decoded character.
    Char(char),
    /// End of the script.
    EndOfInput,
    /// A malformed byte sequence stood where a character should be.
    Invalid,
}

/// Semantic class of one decoded symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CharClass {
    /// The end-of-input sentinel.
    EndOfInput,
    /// Word content: alphanumerics and bare-word punctuation.
    Word,
    /// Space or tab.
    WordSeparator,
    /// `;`, CR, or LF.
    StatementSeparator,
    /// The escape character `\`.
    Escape,
    /// `'`.
    SingleQuote,
    /// `"`.
    DoubleQuote,
    /// `{`.
    OpenCurly,
    /// `}`.
    CloseCurly,
    /// `[`.
    OpenSquare,
    /// `]`.
    CloseSquare,
    /// `#`, which starts a line comment.
    LineCommentMark,
    /// Anything else, including the decode-error sentinel.
    Unknown,
}

/// Punctuation that counts as word content when unquoted.
///
/// Broad on purpose: paths (`/`, `.`), flags (`-`), identifiers (`_`),
/// and URLs/port specs (`:`) should lex as single bare words.
pub const WORD_PUNCTUATION: &[char] = &['-', '_', '.', ':', '/'];

/// Classify one input symbol.
///
/// Total over all symbols: the end-of-input sentinel maps to
/// [`CharClass::EndOfInput`] and the decode-error sentinel to
/// [`CharClass::Unknown`].
pub fn classify(symbol: Symbol) -> CharClass {
    match symbol {
        Symbol::Char(c) => classify_char(c),
        Symbol::EndOfInput => CharClass::EndOfInput,
        Symbol::Invalid => CharClass::Unknown,
    }
}

/// Classify one character.
pub fn classify_char(c: char) -> CharClass {
    if c.is_alphanumeric() || WORD_PUNCTUATION.contains(&c) {
        return CharClass::Word;
    }

    match c {
        ' ' | '\t' => CharClass::WordSeparator,
        '\r' | '\n' | ';' => CharClass::StatementSeparator,
        '\\' => CharClass::Escape,
        '\'' => CharClass::SingleQuote,
        '"' => CharClass::DoubleQuote,
        '{' => CharClass::OpenCurly,
        '}' => CharClass::CloseCurly,
        '[' => CharClass::OpenSquare,
        ']' => CharClass::CloseSquare,
        '#' => CharClass::LineCommentMark,
        _ => CharClass::Unknown,
    }
}
