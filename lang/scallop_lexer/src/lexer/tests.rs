use super::*;
use crate::lex_error::LexErrorKind;
use pretty_assertions::assert_eq;

fn tok(kind: TokenKind, start: u32, end: u32) -> Token {
    Token::new(kind, Span::new(start, end))
}

fn word(start: u32, end: u32) -> Token {
    tok(TokenKind::Word, start, end)
}

fn wsep(start: u32, end: u32) -> Token {
    tok(TokenKind::WordSeparator, start, end)
}

fn ssep(start: u32, end: u32) -> Token {
    tok(TokenKind::StatementSeparator, start, end)
}

fn eof(start: u32) -> Token {
    tok(TokenKind::EndOfInput, start, start + 1)
}

// === Words and Separators ===

#[test]
fn empty_script_is_just_end_of_input() {
    assert_eq!(lex(b"").tokens, vec![eof(0)]);
}

#[test]
fn simple_word_separator_run() {
    assert_eq!(
        lex(b"foo bar\tbaz").tokens,
        vec![
            word(0, 3),
            wsep(3, 4),
            word(4, 7),
            wsep(7, 8),
            word(8, 11),
            eof(11),
        ]
    );
}

#[test]
fn bare_word_punctuation_stays_in_one_word() {
    assert_eq!(
        lex(b"./bin/tool --flag=x:1").tokens,
        // '=' is not a word character, so the word ends before it --
        // and '=' itself is a lex error at top level.
        vec![
            word(0, 10),
            wsep(10, 11),
            tok(TokenKind::Error, 11, 17),
        ]
    );
}

#[test]
fn paths_and_flags_lex_as_single_words() {
    assert_eq!(
        lex(b"cp -r /src/dir dest.bak").tokens,
        vec![
            word(0, 2),
            wsep(2, 3),
            word(3, 5),
            wsep(5, 6),
            word(6, 14),
            wsep(14, 15),
            word(15, 23),
            eof(23),
        ]
    );
}

#[test]
fn multibyte_words_have_byte_exact_spans() {
    let source = "h\u{e9}llo w\u{f6}rld".as_bytes();
    assert_eq!(
        lex(source).tokens,
        vec![word(0, 6), wsep(6, 7), word(7, 13), eof(13)]
    );
}

// === Word Merging ===

#[test]
fn quoted_segments_merge_into_one_word() {
    assert_eq!(lex(b"foo\"bar\"baz").tokens, vec![word(0, 11), eof(11)]);
}

#[test]
fn adjacent_quote_styles_merge() {
    assert_eq!(lex(b"'a'\"b\"c").tokens, vec![word(0, 7), eof(7)]);
}

#[test]
fn empty_quotes_are_an_empty_word() {
    assert_eq!(lex(b"''").tokens, vec![word(0, 2), eof(2)]);
}

#[test]
fn quotes_absorb_separators() {
    assert_eq!(
        lex(b"say 'a b; c'").tokens,
        vec![word(0, 3), wsep(3, 4), word(4, 12), eof(12)]
    );
}

// === Escapes ===

#[test]
fn escape_absorption() {
    // \"a\a \z;\b
    let source = b"\\\"a\\a \\z;\\b";
    assert_eq!(
        lex(source).tokens,
        vec![
            word(0, 5),
            wsep(5, 6),
            word(6, 8),
            ssep(8, 9),
            word(9, 11),
            eof(11),
        ]
    );
}

#[test]
fn escaped_space_joins_words() {
    assert_eq!(lex(b"one\\ two").tokens, vec![word(0, 8), eof(8)]);
}

// === Statement Separators ===

#[test]
fn statement_separator_promotion() {
    assert_eq!(lex(b"  ;\n  ").tokens, vec![ssep(0, 6), eof(6)]);
}

#[test]
fn semicolon_between_words() {
    assert_eq!(
        lex(b"a;b").tokens,
        vec![word(0, 1), ssep(1, 2), word(2, 3), eof(3)]
    );
}

#[test]
fn crlf_is_a_statement_separator_run() {
    assert_eq!(
        lex(b"a\r\nb").tokens,
        vec![word(0, 1), ssep(1, 3), word(3, 4), eof(4)]
    );
}

#[test]
fn word_separators_alone_are_not_promoted() {
    assert_eq!(lex(b" \t ").tokens, vec![wsep(0, 3), eof(3)]);
}

// === Comments ===

#[test]
fn comment_folds_into_statement_separator_run() {
    assert_eq!(
        lex(b"foo # rest\nbar").tokens,
        vec![word(0, 3), ssep(3, 11), word(11, 14), eof(14)]
    );
}

#[test]
fn comment_at_end_of_input_terminates_the_statement() {
    assert_eq!(lex(b"# note").tokens, vec![ssep(0, 6), eof(6)]);
}

#[test]
fn comment_absorbs_semicolons_and_quotes() {
    assert_eq!(
        lex(b"x #';\"{\ny").tokens,
        vec![word(0, 1), ssep(1, 8), word(8, 9), eof(9)]
    );
}

// === Brackets ===

#[test]
fn brackets_are_standalone_tokens() {
    assert_eq!(
        lex(b"{ls}").tokens,
        vec![
            tok(TokenKind::OpenCurlyBracket, 0, 1),
            word(1, 3),
            tok(TokenKind::CloseCurlyBracket, 3, 4),
            eof(4),
        ]
    );
}

#[test]
fn square_brackets() {
    assert_eq!(
        lex(b"[a]").tokens,
        vec![
            tok(TokenKind::OpenSquareBracket, 0, 1),
            word(1, 2),
            tok(TokenKind::CloseSquareBracket, 2, 3),
            eof(3),
        ]
    );
}

#[test]
fn identical_adjacent_brackets_are_one_token() {
    // A maximal identical-state run: the grammar layer deals with it.
    assert_eq!(
        lex(b"{{").tokens,
        vec![tok(TokenKind::OpenCurlyBracket, 0, 2), eof(2)]
    );
}

#[test]
fn brackets_do_not_merge_with_words() {
    assert_eq!(
        lex(b"a{b").tokens,
        vec![
            word(0, 1),
            tok(TokenKind::OpenCurlyBracket, 1, 2),
            word(2, 3),
            eof(3),
        ]
    );
}

// === Errors ===

#[test]
fn unterminated_double_quote_is_an_error_not_a_word() {
    let lexed = lex(b"\"abc");
    assert_eq!(lexed.tokens, vec![tok(TokenKind::Error, 0, 4)]);
    assert_eq!(
        lexed.error.map(|e| e.kind),
        Some(LexErrorKind::UnterminatedDoubleQuote)
    );
}

#[test]
fn unterminated_single_quote_is_an_error() {
    let lexed = lex(b"'x");
    assert_eq!(lexed.tokens, vec![tok(TokenKind::Error, 0, 2)]);
    assert_eq!(
        lexed.error.map(|e| e.kind),
        Some(LexErrorKind::UnterminatedSingleQuote)
    );
}

#[test]
fn preceding_tokens_are_delivered_before_the_error() {
    let lexed = lex(b"say \"unfinished");
    assert_eq!(
        lexed.tokens,
        vec![word(0, 3), wsep(3, 4), tok(TokenKind::Error, 4, 15)]
    );
}

#[test]
fn unknown_character_is_an_error() {
    let lexed = lex(b"!");
    assert_eq!(lexed.tokens, vec![tok(TokenKind::Error, 0, 0)]);
    assert_eq!(
        lexed.error.map(|e| e.kind),
        Some(LexErrorKind::UnexpectedCharacter { found: '!' })
    );
}

#[test]
fn word_interrupted_by_unknown_character_collapses_into_the_error() {
    let lexed = lex(b"ok!");
    assert_eq!(lexed.tokens, vec![tok(TokenKind::Error, 0, 2)]);
}

#[test]
fn separator_run_is_emitted_before_the_error() {
    let lexed = lex(b"  !");
    assert_eq!(
        lexed.tokens,
        vec![wsep(0, 2), tok(TokenKind::Error, 2, 2)]
    );
    assert_eq!(
        lexed.error.map(|e| e.kind),
        Some(LexErrorKind::UnexpectedCharacter { found: '!' })
    );
}

#[test]
fn dangling_escape_is_an_error() {
    let lexed = lex(b"\\");
    assert_eq!(lexed.tokens, vec![tok(TokenKind::Error, 0, 1)]);
    assert_eq!(lexed.error.map(|e| e.kind), Some(LexErrorKind::DanglingEscape));
}

#[test]
fn invalid_utf8_is_an_error() {
    let lexed = lex(&[0xFF]);
    assert_eq!(lexed.tokens, vec![tok(TokenKind::Error, 0, 0)]);
    assert_eq!(lexed.error.map(|e| e.kind), Some(LexErrorKind::InvalidUtf8));
}

#[test]
fn error_span_is_recorded_in_the_lex_error() {
    let lexed = lex(b"a \x01b");
    assert_eq!(
        lexed.error,
        Some(LexError {
            span: Span::new(2, 3),
            kind: LexErrorKind::UnexpectedCharacter { found: '\u{1}' }
        })
    );
}

#[test]
fn no_error_on_success() {
    assert_eq!(lex(b"fine").error, None);
}

// === Iterator Contract ===

#[test]
fn lexer_fuses_after_end_of_input() {
    let buf = SourceBuffer::new(b"a");
    let mut lexer = Lexer::new(&buf);
    assert_eq!(lexer.next(), Some(word(0, 1)));
    assert_eq!(lexer.next(), Some(eof(1)));
    assert_eq!(lexer.next(), None);
    assert_eq!(lexer.next(), None);
}

#[test]
fn lexer_fuses_after_error() {
    let buf = SourceBuffer::new(b"!");
    let mut lexer = Lexer::new(&buf);
    assert_eq!(lexer.next(), Some(tok(TokenKind::Error, 0, 0)));
    assert_eq!(lexer.next(), None);
}

#[test]
fn copy_snapshot_replays_the_remainder() {
    let buf = SourceBuffer::new(b"a b c");
    let mut lexer = Lexer::new(&buf);
    assert_eq!(lexer.next(), Some(word(0, 1)));

    let snapshot = lexer;
    let rest_a: Vec<Token> = lexer.collect();
    let rest_b: Vec<Token> = snapshot.collect();
    assert_eq!(rest_a, rest_b);
}

#[test]
fn resume_after_any_token_reproduces_the_remainder() {
    let buf = SourceBuffer::new(b"one 'two three' {four}; #five\nsix");
    let all: Vec<Token> = Lexer::new(&buf).collect();

    for (i, token) in all.iter().enumerate() {
        let resumed: Vec<Token> = Lexer::resume_after(&buf, token).collect();
        assert_eq!(resumed, all[i + 1..].to_vec(), "resume after token {i}");
    }
}

// === Properties ===

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn script() -> impl Strategy<Value = Vec<u8>> {
        let byte = prop_oneof![
            8 => prop_oneof![
                Just(b'a'), Just(b'Z'), Just(b'0'), Just(b'-'), Just(b'/'),
                Just(b' '), Just(b'\t'), Just(b'\n'), Just(b'\r'), Just(b';'),
                Just(b'\''), Just(b'"'), Just(b'\\'), Just(b'{'), Just(b'}'),
                Just(b'['), Just(b']'), Just(b'#'),
            ],
            1 => any::<u8>(),
        ];
        proptest::collection::vec(byte, 0..48)
    }

    proptest! {
        /// Token spans tile the input contiguously from offset zero, and
        /// the stream ends with exactly one terminal token.
        #[test]
        fn spans_are_contiguous_with_one_terminal(source in script()) {
            let lexed = lex(&source);
            let mut expected_start = 0u32;
            let terminal_count = lexed
                .tokens
                .iter()
                .filter(|t| t.kind.is_terminal())
                .count();
            prop_assert_eq!(terminal_count, 1);

            for token in &lexed.tokens {
                prop_assert_eq!(token.span.start, expected_start);
                prop_assert!(token.span.end >= token.span.start);
                expected_start = token.span.end;
            }

            let last = &lexed.tokens[lexed.tokens.len() - 1];
            prop_assert!(last.kind.is_terminal());
            match last.kind {
                TokenKind::EndOfInput => {
                    // The whole input plus the virtual end-of-input byte.
                    prop_assert_eq!(expected_start as usize, source.len() + 1);
                    prop_assert!(lexed.error.is_none());
                }
                _ => prop_assert!(lexed.error.is_some()),
            }
        }

        /// Lexing is deterministic.
        #[test]
        fn lexing_is_deterministic(source in script()) {
            prop_assert_eq!(lex(&source), lex(&source));
        }

        /// Every non-terminal token is non-empty.
        #[test]
        fn non_terminal_tokens_are_non_empty(source in script()) {
            for token in lex(&source).tokens {
                if !token.kind.is_terminal() {
                    prop_assert!(!token.span.is_empty(), "{token:?}");
                }
            }
        }
    }
}
