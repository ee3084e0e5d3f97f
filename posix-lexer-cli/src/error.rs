//! Errors reported by the command-line interface.

use std::path::PathBuf;

/// Represents an error that ends a `posix-lex` run.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input text could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    ReadInput {
        /// Path of the input; `-` for standard input.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input could not be tokenized.
    #[error(transparent)]
    Tokenize(#[from] posix_lexer::TokenizerError),

    /// An explicitly requested configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigLoadError),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    WriteOutput(#[from] std::io::Error),

    /// A token could not be serialized.
    #[error("failed to serialize token: {0}")]
    Serialize(#[from] serde_json::Error),
}
