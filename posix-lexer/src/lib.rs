//! Implements POSIX shell token recognition (IEEE 1003.1-2017, section 2.3).
//!
//! Input text is broken into operators, words, reserved words, and newlines.
//! Quoting and escaping are resolved while scanning, so word tokens carry their
//! final text. No parsing or expansion happens here.

mod source;
mod tokenizer;

pub use source::{SourcePosition, SourceSpan};
pub use tokenizer::{
    KEYWORDS, OPERATORS, QuoteKind, Token, TokenKind, Tokenizer, TokenizerError, TokenizerOptions,
    is_keyword, is_operator, tokenize_str, tokenize_str_with_options, uncached_tokenize_str,
    unquote_str,
};
