use std::fmt::Display;
use utf8_chars::BufReadCharsExt;

use crate::{SourcePosition, SourceSpan};

/// Reserved words recognized by the tokenizer.
pub const KEYWORDS: [&str; 10] = [
    "if", "then", "else", "fi", "for", "while", "do", "done", "case", "esac",
];

/// Operators recognized by the tokenizer.
pub const OPERATORS: [&str; 16] = [
    "<<", ">>", "&&", "||", ";;", "<>", ">|", "<&", ">&", "<", ">", "|", "&", ";", "(", ")",
];

/// Classifies a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TokenKind {
    /// A control or redirection operator.
    Operator,
    /// A word.
    Word,
    /// A word that spells a reserved word.
    Keyword,
    /// An unquoted newline.
    Newline,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Operator => write!(f, "operator"),
            Self::Word => write!(f, "word"),
            Self::Keyword => write!(f, "keyword"),
            Self::Newline => write!(f, "newline"),
        }
    }
}

/// Represents a token extracted from shell input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Token {
    /// An operator token.
    Operator(String, SourceSpan),
    /// A word token, with quoting already removed.
    Word(String, SourceSpan),
    /// A reserved word.
    Keyword(String, SourceSpan),
    /// An unquoted newline.
    Newline(SourceSpan),
}

impl Token {
    /// Returns the string value of the token.
    pub fn to_str(&self) -> &str {
        match self {
            Self::Operator(s, _) | Self::Word(s, _) | Self::Keyword(s, _) => s,
            Self::Newline(_) => "\n",
        }
    }

    /// Returns the kind of the token.
    pub const fn kind(&self) -> TokenKind {
        match self {
            Self::Operator(..) => TokenKind::Operator,
            Self::Word(..) => TokenKind::Word,
            Self::Keyword(..) => TokenKind::Keyword,
            Self::Newline(_) => TokenKind::Newline,
        }
    }

    /// Returns the location of the token in the source text.
    pub const fn location(&self) -> &SourceSpan {
        match self {
            Self::Operator(_, l) | Self::Word(_, l) | Self::Keyword(_, l) | Self::Newline(l) => l,
        }
    }
}

/// The kind of quote that opened a quoted section of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum QuoteKind {
    /// A single quote (`'`).
    Single,
    /// A double quote (`"`).
    Double,
}

impl Display for QuoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single"),
            Self::Double => write!(f, "double"),
        }
    }
}

/// Represents an error that occurred during tokenization.
#[derive(thiserror::Error, Debug)]
pub enum TokenizerError {
    /// The input ended inside a quoted section of a word.
    #[error("unclosed {quote} quote at {position}")]
    UnclosedQuote {
        /// The kind of quote left open.
        quote: QuoteKind,
        /// Position of the opening quote.
        position: SourcePosition,
    },

    /// An error occurred decoding UTF-8 characters in the input stream.
    #[error("failed to decode UTF-8 characters")]
    FailedDecoding,

    /// An I/O error occurred while reading from the input stream.
    #[error("failed to read input")]
    ReadError(#[from] std::io::Error),
}

impl TokenizerError {
    /// Returns true if the error represents an error that could possibly be due
    /// to an incomplete input stream.
    pub const fn is_incomplete(&self) -> bool {
        matches!(self, Self::UnclosedQuote { .. })
    }

    fn from_read_error(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::InvalidData {
            Self::FailedDecoding
        } else {
            Self::ReadError(err)
        }
    }
}

/// Options controlling how the tokenizer operates.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct TokenizerOptions {
    /// Only recognize reserved words that contain no quoting or escaping at all.
    /// When disabled, words are classified by their text after quote removal,
    /// so `'if'` is reported as a keyword.
    pub posix_mode: bool,
}

#[derive(Clone, Debug)]
enum QuoteMode {
    None,
    Single(SourcePosition),
    Double(SourcePosition),
}

/// Encapsulates the state of the word currently being scanned.
#[derive(Clone, Debug)]
struct WordParseState {
    start_position: SourcePosition,
    token_so_far: String,
    quote_mode: QuoteMode,
    quoted: bool,
}

impl WordParseState {
    const fn new(start_position: SourcePosition) -> Self {
        Self {
            start_position,
            token_so_far: String::new(),
            quote_mode: QuoteMode::None,
            quoted: false,
        }
    }

    fn append_char(&mut self, c: char) {
        self.token_so_far.push(c);
    }

    fn enter_quote(&mut self, mode: QuoteMode) {
        tracing::debug!(target: "tokenize", "entering {mode:?}");
        self.quoted = true;
        self.quote_mode = mode;
    }

    fn leave_quote(&mut self) {
        tracing::debug!(target: "tokenize", "leaving {:?}", self.quote_mode);
        self.quote_mode = QuoteMode::None;
    }

    fn finish(
        self,
        end_position: &SourcePosition,
        options: &TokenizerOptions,
    ) -> Result<Token, TokenizerError> {
        match self.quote_mode {
            QuoteMode::Single(position) => {
                return Err(TokenizerError::UnclosedQuote {
                    quote: QuoteKind::Single,
                    position,
                });
            }
            QuoteMode::Double(position) => {
                return Err(TokenizerError::UnclosedQuote {
                    quote: QuoteKind::Double,
                    position,
                });
            }
            QuoteMode::None => (),
        }

        let location = SourceSpan {
            start: self.start_position,
            end: end_position.to_owned(),
        };

        let reserved = is_keyword(&self.token_so_far) && !(options.posix_mode && self.quoted);
        if reserved {
            Ok(Token::Keyword(self.token_so_far, location))
        } else {
            Ok(Token::Word(self.token_so_far, location))
        }
    }
}

/// A tokenizer for shell input.
///
/// Tokens are produced lazily, one per call to [`Tokenizer::next_token`] (or per
/// iteration). Once an error has been returned, no further tokens are produced.
pub struct Tokenizer<'a, R: ?Sized + std::io::BufRead> {
    char_reader: std::iter::Peekable<utf8_chars::Chars<'a, R>>,
    cursor: SourcePosition,
    options: TokenizerOptions,
    failed: bool,
}

/// Break the given input shell text into tokens, returning the tokens.
///
/// # Arguments
///
/// * `input` - The shell text to tokenize.
pub fn tokenize_str(input: &str) -> Result<Vec<Token>, TokenizerError> {
    tokenize_str_with_options(input, &TokenizerOptions::default())
}

/// Break the given input shell text into tokens, returning the tokens.
///
/// # Arguments
///
/// * `input` - The shell text to tokenize.
/// * `options` - Options controlling how the tokenizer operates.
pub fn tokenize_str_with_options(
    input: &str,
    options: &TokenizerOptions,
) -> Result<Vec<Token>, TokenizerError> {
    uncached_tokenize_string(input.to_owned(), options.to_owned())
}

#[cached::proc_macro::cached(name = "TOKENIZE_CACHE", size = 64, result = true)]
fn uncached_tokenize_string(
    input: String,
    options: TokenizerOptions,
) -> Result<Vec<Token>, TokenizerError> {
    uncached_tokenize_str(input.as_str(), &options)
}

/// Break the given input shell text into tokens, returning the tokens.
/// No caching is performed.
///
/// # Arguments
///
/// * `input` - The shell text to tokenize.
/// * `options` - Options controlling how the tokenizer operates.
pub fn uncached_tokenize_str(
    input: &str,
    options: &TokenizerOptions,
) -> Result<Vec<Token>, TokenizerError> {
    tracing::debug!(target: "tokenize", "Tokenizing...");

    let mut reader = input.as_bytes();
    let tokens = Tokenizer::new(&mut reader, options).collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(target: "tokenize", "  => {} token(s)", tokens.len());

    Ok(tokens)
}

impl<'a, R: ?Sized + std::io::BufRead> Tokenizer<'a, R> {
    /// Creates a new tokenizer reading from the given reader.
    ///
    /// # Arguments
    ///
    /// * `reader` - The source of the shell text.
    /// * `options` - Options controlling how the tokenizer operates.
    pub fn new(reader: &'a mut R, options: &TokenizerOptions) -> Self {
        Tokenizer {
            char_reader: reader.chars().peekable(),
            cursor: SourcePosition::default(),
            options: options.clone(),
            failed: false,
        }
    }

    /// Returns the position of the next character to be read.
    pub const fn current_location(&self) -> &SourcePosition {
        &self.cursor
    }

    fn next_char(&mut self) -> Result<Option<char>, TokenizerError> {
        let c = self
            .char_reader
            .next()
            .transpose()
            .map_err(TokenizerError::from_read_error)?;

        if let Some(ch) = c {
            self.cursor.advance(ch);
        }

        Ok(c)
    }

    fn consume_char(&mut self) -> Result<(), TokenizerError> {
        let _ = self.next_char()?;
        Ok(())
    }

    fn peek_char(&mut self) -> Result<Option<char>, TokenizerError> {
        match self.char_reader.peek() {
            Some(Ok(c)) => Ok(Some(*c)),
            // Take the error out of the peeked slot so the underlying cause survives.
            Some(Err(_)) => match self.char_reader.next() {
                Some(Err(e)) => Err(TokenizerError::from_read_error(e)),
                _ => Err(TokenizerError::FailedDecoding),
            },
            None => Ok(None),
        }
    }

    /// Returns the next token from the input stream, or `None` once the input is
    /// exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, TokenizerError> {
        if self.failed {
            return Ok(None);
        }

        let result = self.scan_token();
        match &result {
            Ok(Some(token)) => {
                tracing::debug!(target: "tokenize", "TOKEN: {token:?}");
            }
            Ok(None) => (),
            Err(e) => {
                tracing::debug!(target: "tokenize", "tokenization failed: {e}");
                self.failed = true;
            }
        }

        result
    }

    fn scan_token(&mut self) -> Result<Option<Token>, TokenizerError> {
        while let Some(c) = self.peek_char()? {
            match c {
                '\n' => return self.read_newline().map(Some),
                c if is_blank(c) => self.consume_char()?,
                '#' => self.skip_comment()?,
                c if can_start_operator(c) => return self.read_operator(c).map(Some),
                _ => return self.read_word().map(Some),
            }
        }

        Ok(None)
    }

    fn read_newline(&mut self) -> Result<Token, TokenizerError> {
        let start = self.cursor.clone();
        self.consume_char()?;

        Ok(Token::Newline(SourceSpan {
            start,
            end: self.cursor.clone(),
        }))
    }

    fn skip_comment(&mut self) -> Result<(), TokenizerError> {
        while let Some(c) = self.peek_char()? {
            if c == '\n' {
                break;
            }
            self.consume_char()?;
        }

        Ok(())
    }

    fn read_operator(&mut self, first: char) -> Result<Token, TokenizerError> {
        let start = self.cursor.clone();
        self.consume_char()?;

        let mut operator = String::from(first);
        if let Some(second) = self.peek_char()? {
            operator.push(second);
            if is_operator(&operator) {
                self.consume_char()?;
            } else {
                operator.pop();
            }
        }

        Ok(Token::Operator(
            operator,
            SourceSpan {
                start,
                end: self.cursor.clone(),
            },
        ))
    }

    fn read_word(&mut self) -> Result<Token, TokenizerError> {
        let mut state = WordParseState::new(self.cursor.clone());

        while let Some(c) = self.peek_char()? {
            match state.quote_mode {
                QuoteMode::None => {
                    // Separators end the word without being consumed.
                    if is_blank(c) || c == '\n' || can_start_operator(c) {
                        break;
                    }

                    let position = self.cursor.clone();
                    self.consume_char()?;

                    match c {
                        '\\' => {
                            state.quoted = true;
                            self.append_escaped_char(&mut state)?;
                        }
                        '\'' => state.enter_quote(QuoteMode::Single(position)),
                        '\"' => state.enter_quote(QuoteMode::Double(position)),
                        c => state.append_char(c),
                    }
                }
                QuoteMode::Single(_) => {
                    self.consume_char()?;

                    if c == '\'' {
                        state.leave_quote();
                    } else {
                        state.append_char(c);
                    }
                }
                QuoteMode::Double(_) => {
                    self.consume_char()?;

                    match c {
                        '\"' => state.leave_quote(),
                        '\\' => self.append_escaped_char(&mut state)?,
                        c => state.append_char(c),
                    }
                }
            }
        }

        state.finish(&self.cursor, &self.options)
    }

    /// Consumes the character following a backslash and appends it literally. A
    /// backslash at the very end of the input contributes nothing.
    fn append_escaped_char(&mut self, state: &mut WordParseState) -> Result<(), TokenizerError> {
        if let Some(escaped) = self.next_char()? {
            state.append_char(escaped);
        }

        Ok(())
    }
}

impl<R: ?Sized + std::io::BufRead> Iterator for Tokenizer<'_, R> {
    type Item = Result<Token, TokenizerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl<R: ?Sized + std::io::BufRead> std::iter::FusedIterator for Tokenizer<'_, R> {}

/// Returns whether the given text spells a reserved word.
///
/// # Arguments
///
/// * `s` - The text to check.
pub fn is_keyword(s: &str) -> bool {
    KEYWORDS.contains(&s)
}

/// Returns whether the given text is an operator.
///
/// # Arguments
///
/// * `s` - The text to check.
pub fn is_operator(s: &str) -> bool {
    OPERATORS.contains(&s)
}

const fn can_start_operator(c: char) -> bool {
    matches!(c, '<' | '>' | '|' | '&' | ';' | '(' | ')')
}

const fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Return a string with all the quoting removed, following the same rules the
/// tokenizer applies within a word. Unclosed quotes are tolerated.
///
/// # Arguments
///
/// * `s` - The string to unquote.
pub fn unquote_str(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut quote: Option<QuoteKind> = None;

    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(QuoteKind::Single), '\'') | (Some(QuoteKind::Double), '\"') => quote = None,
            (Some(QuoteKind::Single), c) => result.push(c),
            (_, '\\') => {
                if let Some(escaped) = chars.next() {
                    result.push(escaped);
                }
            }
            (None, '\'') => quote = Some(QuoteKind::Single),
            (None, '\"') => quote = Some(QuoteKind::Double),
            (_, c) => result.push(c),
        }
    }

    result
}
