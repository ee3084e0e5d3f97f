//! Rendering of tokens for display.

use posix_lexer::{Token, TokenKind};
use std::io::Write;

use crate::args::OutputFormat;
use crate::error::CliError;

/// A token as rendered in JSON output.
#[derive(Debug, serde::Serialize)]
pub struct TokenRecord<'a> {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token's resolved text.
    pub text: &'a str,
    /// 1-based line where the token starts.
    pub line: usize,
    /// 1-based column where the token starts.
    pub column: usize,
}

impl<'a> From<&'a Token> for TokenRecord<'a> {
    fn from(token: &'a Token) -> Self {
        let start = &token.location().start;
        Self {
            kind: token.kind(),
            text: token.to_str(),
            line: start.line,
            column: start.column,
        }
    }
}

/// Writes tokens to an output stream in the selected format.
///
/// Line-oriented formats are written as each token arrives; the JSON array
/// format holds tokens back until [`TokenWriter::finish`].
pub struct TokenWriter<W: Write> {
    out: W,
    format: OutputFormat,
    held: Vec<Token>,
}

impl<W: Write> TokenWriter<W> {
    /// Creates a writer rendering to `out` in the given format.
    pub const fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            held: Vec::new(),
        }
    }

    /// Renders one token.
    pub fn write_token(&mut self, token: Token) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Json => self.held.push(token),
            OutputFormat::JsonLines => {
                serde_json::to_writer(&mut self.out, &TokenRecord::from(&token))?;
                writeln!(self.out)?;
            }
            OutputFormat::Text => {
                writeln!(self.out, "{}\t{:?}", token.kind(), token.to_str())?;
            }
        }

        Ok(())
    }

    /// Flushes anything already rendered, discarding held tokens.
    pub fn abandon(mut self) -> Result<(), CliError> {
        self.held.clear();
        self.out.flush()?;
        Ok(())
    }

    /// Completes the output and returns the underlying stream.
    pub fn finish(mut self) -> Result<W, CliError> {
        if matches!(self.format, OutputFormat::Json) {
            let records: Vec<_> = self.held.iter().map(TokenRecord::from).collect();
            serde_json::to_writer_pretty(&mut self.out, &records)?;
            writeln!(self.out)?;
        }

        self.out.flush()?;
        Ok(self.out)
    }
}
