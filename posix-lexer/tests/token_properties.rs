//! Property tests for token recognition.

use posix_lexer::{
    OPERATORS, Token, TokenKind, Tokenizer, TokenizerError, TokenizerOptions, is_keyword,
    tokenize_str, tokenize_str_with_options,
};
use proptest::prelude::*;

const POSIX: TokenizerOptions = TokenizerOptions { posix_mode: true };

/// Fragments free of blanks, quotes, escapes, comments, and operator characters.
fn plain_fragment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_./=:,+%@-]{1,12}"
}

fn plain_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            plain_fragment(),
            prop::sample::select(posix_lexer::KEYWORDS.to_vec()).prop_map(String::from),
        ],
        0..12,
    )
}

fn kinds_and_text(tokens: &[Token]) -> Vec<(TokenKind, String)> {
    tokens
        .iter()
        .map(|t| (t.kind(), t.to_str().to_owned()))
        .collect()
}

fn expected_kind(text: &str) -> TokenKind {
    if is_keyword(text) {
        TokenKind::Keyword
    } else {
        TokenKind::Word
    }
}

proptest! {
    #[test]
    fn prop_plain_words_retokenize_identically(words in plain_words()) {
        let tokens = tokenize_str(&words.join(" ")).unwrap();
        prop_assert_eq!(tokens.len(), words.len());

        let rendered: Vec<&str> = tokens.iter().map(|t| t.to_str()).collect();
        let again = tokenize_str(&rendered.join(" ")).unwrap();

        prop_assert_eq!(kinds_and_text(&tokens), kinds_and_text(&again));
        for token in &tokens {
            prop_assert_eq!(token.kind(), expected_kind(token.to_str()));
        }
    }

    #[test]
    fn prop_quoted_fragments_concatenate(
        a in plain_fragment(),
        b in plain_fragment(),
        c in plain_fragment(),
    ) {
        let input = format!("{a}'{b}'\"{c}\"");
        let expected = format!("{a}{b}{c}");

        let tokens = tokenize_str(&input).unwrap();
        prop_assert_eq!(
            kinds_and_text(&tokens),
            vec![(expected_kind(&expected), expected.clone())]
        );

        // Quoting keeps a word from being reserved in POSIX mode.
        let tokens = tokenize_str_with_options(&input, &POSIX).unwrap();
        prop_assert_eq!(kinds_and_text(&tokens), vec![(TokenKind::Word, expected)]);
    }

    #[test]
    fn prop_escape_is_transparent(x in any::<char>().prop_filter("non-null", |c| *c != '\0')) {
        let tokens = tokenize_str(&format!("\\{x}")).unwrap();
        prop_assert_eq!(kinds_and_text(&tokens), vec![(TokenKind::Word, x.to_string())]);
    }

    #[test]
    fn prop_single_quotes_are_literal(s in "[^']*") {
        let tokens = tokenize_str_with_options(&format!("'{s}'"), &POSIX).unwrap();
        prop_assert_eq!(kinds_and_text(&tokens), vec![(TokenKind::Word, s)]);
    }

    #[test]
    fn prop_comments_are_stripped(line in "[a-z ;|&<>()]{0,30}", comment in "[^\n]*") {
        // The comment must start where a new token would, so separate it with a blank.
        let without = tokenize_str(&format!("{line} ")).unwrap();
        let with = tokenize_str(&format!("{line} #{comment}")).unwrap();
        prop_assert_eq!(kinds_and_text(&without), kinds_and_text(&with));
    }

    #[test]
    fn prop_unclosed_quote_fails_without_tokens(s in "[^'\"\\\\]*", double in any::<bool>()) {
        let quote = if double { '"' } else { '\'' };
        let input = format!("{quote}{s}");

        let mut reader = input.as_bytes();
        let results: Vec<_> = Tokenizer::new(&mut reader, &TokenizerOptions::default()).collect();

        prop_assert_eq!(results.len(), 1);
        let is_unclosed = matches!(results[0], Err(TokenizerError::UnclosedQuote { .. }));
        prop_assert!(is_unclosed);
    }

    #[test]
    fn prop_tokenization_is_deterministic(input in "[a-z '\"\\\\;|&<>()#\n\t]{0,40}") {
        let first = posix_lexer::uncached_tokenize_str(&input, &TokenizerOptions::default());
        let second = posix_lexer::uncached_tokenize_str(&input, &TokenizerOptions::default());

        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "results differ"),
        }
    }

    #[test]
    fn prop_unquoted_newlines_are_tokens(lines in prop::collection::vec(plain_fragment(), 1..6)) {
        let tokens = tokenize_str(&lines.join("\n")).unwrap();
        let newlines = tokens.iter().filter(|t| t.kind() == TokenKind::Newline).count();
        prop_assert_eq!(newlines, lines.len() - 1);
    }
}

#[test]
fn two_char_operators_are_greedy() {
    for operator in OPERATORS.iter().filter(|o| o.len() == 2) {
        let tokens = tokenize_str(operator).unwrap();
        assert_eq!(
            kinds_and_text(&tokens),
            vec![(TokenKind::Operator, (*operator).to_owned())],
        );
    }
}
