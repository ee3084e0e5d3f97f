//! Command-line arguments for `posix-lex`.

use clap::{Parser, builder::styling};
use std::path::PathBuf;

use crate::{events, productinfo};

const SHORT_DESCRIPTION: &str = "Break POSIX shell text into tokens";

const LONG_DESCRIPTION: &str = r"
posix-lex recognizes POSIX shell tokens (IEEE 1003.1-2017, section 2.3) in its input and
prints them as operators, words, reserved words, and newlines. Quoting and escaping are
resolved; comments are dropped. Nothing is parsed or executed.
";

const VERSION: &str = const_format::concatcp!(
    productinfo::PRODUCT_VERSION,
    " (",
    productinfo::PRODUCT_GIT_VERSION,
    ")"
);

/// Identifies how tokens are rendered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// A single JSON array, printed once tokenization succeeds.
    Json,
    /// One JSON object per token, printed as each token is recognized.
    #[default]
    JsonLines,
    /// One tab-separated line per token.
    Text,
}

/// Parsed command-line arguments for `posix-lex`.
#[derive(Parser)]
#[clap(name = productinfo::PRODUCT_NAME,
       version = VERSION,
       about = SHORT_DESCRIPTION,
       long_about = LONG_DESCRIPTION,
       author,
       disable_help_flag = true,
       disable_version_flag = true,
       styles = help_styles())]
#[allow(clippy::module_name_repetitions)]
pub struct CommandLineArgs {
    /// Display usage information.
    #[clap(long = "help", action = clap::ArgAction::HelpLong)]
    pub help: Option<bool>,

    /// Display version.
    #[clap(long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Tokenize the provided string instead of reading a file.
    #[arg(short = 'c', long = "command", value_name = "STRING", conflicts_with = "input_path")]
    pub command: Option<String>,

    /// Output format.
    #[clap(short = 'f', long = "format", value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Only recognize reserved words that contain no quoting.
    #[clap(long = "posix", overrides_with = "no_posix")]
    pub posix: bool,

    /// Classify reserved words by their text after quote removal, even if a
    /// configuration file enables `posix-mode`.
    #[clap(long = "no-posix", overrides_with = "posix")]
    pub no_posix: bool,

    /// Path to a configuration file to use instead of the default.
    #[clap(long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Don't load any configuration file.
    #[clap(long = "no-config", conflicts_with = "config_path")]
    pub no_config: bool,

    /// Disable colorized output.
    #[clap(long = "disable-color")]
    pub disable_color: bool,

    /// Enable debug logging for classes of tracing events.
    #[clap(long = "debug", alias = "log-enable", value_name = "EVENT")]
    pub enabled_debug_events: Vec<events::TraceEvent>,

    /// Path of the file to tokenize; reads standard input when omitted or `-`.
    #[clap(value_name = "FILE")]
    pub input_path: Option<PathBuf>,
}

/// Returns clap styling to be used for command-line help.
#[doc(hidden)]
fn help_styles() -> clap::builder::Styles {
    styling::Styles::styled()
        .header(
            styling::AnsiColor::Yellow.on_default()
                | styling::Effects::BOLD
                | styling::Effects::UNDERLINE,
        )
        .usage(styling::AnsiColor::Green.on_default() | styling::Effects::BOLD)
        .literal(styling::AnsiColor::Magenta.on_default() | styling::Effects::BOLD)
        .placeholder(styling::AnsiColor::Cyan.on_default())
}
