//! Implements the command-line interface for `posix-lex`.

use clap::Parser;
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use crate::args::CommandLineArgs;
use crate::config::{self, Settings};
use crate::error::CliError;
use crate::error_formatter;
use crate::events;
use crate::output::TokenWriter;
use crate::productinfo;

/// Main entry point for `posix-lex`.
pub fn run() {
    //
    // Install panic handlers to report our panic and cleanly exit on panic.
    //
    install_panic_handlers();

    //
    // Parse args.
    //
    let parsed_args = match CommandLineArgs::try_parse() {
        Ok(parsed_args) => parsed_args,
        Err(e) => {
            let _ = e.print();

            // clap returns errors for `--help`, `--version`, etc.
            let exit_code = match e.kind() {
                clap::error::ErrorKind::DisplayVersion => 0,
                clap::error::ErrorKind::DisplayHelp => 0,
                _ => 2,
            };

            std::process::exit(exit_code);
        }
    };

    //
    // Run.
    //
    let exit_code = execute(&parsed_args);

    std::process::exit(i32::from(exit_code));
}

/// Installs a panic handler. On release builds, it will capture panic details to a
/// temporary .toml file and report a human-readable message to the screen.
fn install_panic_handlers() {
    human_panic::setup_panic!(
        human_panic::Metadata::new(productinfo::PRODUCT_NAME, productinfo::PRODUCT_VERSION)
            .homepage(productinfo::PRODUCT_DISPLAY_URI)
            .support(const_format::concatcp!(
                "please file an issue at ",
                productinfo::PRODUCT_DISPLAY_URI,
                "/issues/new"
            ))
    );
}

/// Tokenizes the selected input and prints the tokens. Returns the exit code.
///
/// # Arguments
///
/// * `args` - The already-parsed command-line arguments.
fn execute(args: &CommandLineArgs) -> u8 {
    // Initializing tracing.
    let event_config = events::TraceEventConfig::init(&args.enabled_debug_events);
    tracing::debug!(target: "config", "enabled events: {:?}", event_config.get_enabled_events());
    tracing::debug!(target: "config", "{}", productinfo::get_product_display_str());

    let loaded = config::load_config(args.no_config, args.config_path.as_deref());
    let mut formatter = error_formatter::Formatter {
        use_color: !args.disable_color && std::io::stderr().is_terminal(),
    };

    match loaded.error {
        Some(err) if loaded.explicit_path => {
            eprint!("{}", formatter.format_error(&CliError::Config(err)));
            return 1;
        }
        Some(err) => match &loaded.path {
            Some(path) => tracing::warn!("ignoring config file {}: {err}", path.display()),
            None => tracing::warn!("ignoring config file: {err}"),
        },
        None => (),
    }

    let settings = loaded.config.to_settings(args);
    formatter.use_color &= settings.color;

    let result = read_input(args).and_then(|input| {
        tokenize_to(&input, &settings, std::io::stdout().lock()).map(|_| ())
    });

    match result {
        Ok(()) => 0,
        Err(err) => {
            eprint!("{}", formatter.format_error(&err));
            1
        }
    }
}

/// Reads the text to tokenize: the `-c` string, the named file, or standard input.
fn read_input(args: &CommandLineArgs) -> Result<String, CliError> {
    if let Some(command) = &args.command {
        tracing::debug!(target: "input", "tokenizing command string");
        return Ok(command.clone());
    }

    match args.input_path.as_deref() {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(target: "input", "reading {}", path.display());
            std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            tracing::debug!(target: "input", "reading standard input");
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| CliError::ReadInput {
                    path: PathBuf::from("-"),
                    source,
                })?;
            Ok(input)
        }
    }
}

/// Tokenizes `input` and renders each token to `out` as it is recognized. Tokens
/// rendered before a tokenization error stay written.
fn tokenize_to<W: Write>(input: &str, settings: &Settings, out: W) -> Result<W, CliError> {
    let mut reader = input.as_bytes();
    let mut writer = TokenWriter::new(out, settings.format);

    for result in posix_lexer::Tokenizer::new(&mut reader, &settings.tokenizer) {
        match result {
            Ok(token) => writer.write_token(token)?,
            Err(err) => {
                writer.abandon()?;
                return Err(err.into());
            }
        }
    }

    writer.finish()
}
