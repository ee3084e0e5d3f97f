//! Configuration file support for `posix-lex`.
//!
//! This module provides TOML-based configuration file loading with the following features:
//! - Forward-compatible: unknown fields are ignored
//! - Layered configuration: defaults < config file < command-line arguments

use etcetera::BaseStrategy;
use std::path::{Path, PathBuf};

use crate::args::{CommandLineArgs, OutputFormat};

/// Root configuration structure.
///
/// All fields are optional to support forward compatibility and partial configuration.
/// Unknown fields in the TOML file are silently ignored.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tokenizer configuration options.
    pub lexer: LexerConfig,

    /// Output configuration options.
    pub output: OutputConfig,
}

/// Tokenizer configuration options.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Only recognize reserved words that contain no quoting.
    #[serde(rename = "posix-mode")]
    pub posix_mode: Option<bool>,
}

/// Output configuration options.
#[derive(Debug, Default, Clone, serde::Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used to render tokens.
    pub format: Option<OutputFormat>,

    /// Whether diagnostics may be colorized.
    pub color: Option<bool>,
}

/// Settings resolved from the command line, the configuration file, and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Options passed to the tokenizer.
    pub tokenizer: posix_lexer::TokenizerOptions,
    /// Format used to render tokens.
    pub format: OutputFormat,
    /// Whether diagnostics may be colorized.
    pub color: bool,
}

impl Config {
    /// Merges the configuration with command-line arguments.
    ///
    /// Settings are applied with the following priority (highest to lowest):
    /// 1. CLI arguments (if explicitly set)
    /// 2. Config file values
    /// 3. Default values
    ///
    /// # Arguments
    ///
    /// * `args` - The parsed command-line arguments
    #[must_use]
    pub fn to_settings(&self, args: &CommandLineArgs) -> Settings {
        let posix_mode = if args.no_posix {
            false
        } else {
            merge_bool_setting(args.posix, false, self.lexer.posix_mode)
        };
        let color = !merge_bool_setting(
            args.disable_color,
            false,
            self.output.color.map(|color| !color),
        );

        let format = args
            .format
            .or(self.output.format)
            .unwrap_or_default();

        Settings {
            tokenizer: posix_lexer::TokenizerOptions { posix_mode },
            format,
            color,
        }
    }
}

/// Merges a boolean setting from CLI args, config file, and defaults.
///
/// Priority: CLI (if explicitly set) > config file > default.
///
/// Since boolean CLI flags can't distinguish between "explicitly set to false" and
/// "not provided" (both result in `false`), we use a heuristic:
/// - If the CLI value differs from the default, the user explicitly provided it
/// - Otherwise, use the config value if present, or fall back to the default
const fn merge_bool_setting(
    cli_value: bool,
    cli_default: bool,
    config_value: Option<bool>,
) -> bool {
    if cli_value != cli_default {
        cli_value
    } else if let Some(config) = config_value {
        config
    } else {
        cli_default
    }
}

/// Result of attempting to load a configuration file.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration, or default if loading failed.
    pub config: Config,

    /// The path that was used (or attempted) for loading.
    pub path: Option<PathBuf>,

    /// Any error that occurred during loading.
    pub error: Option<ConfigLoadError>,

    /// Whether the path was explicitly provided by the user (via `--config`).
    /// If true and there's an error, the command should fail rather than continue.
    pub explicit_path: bool,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[source] std::io::Error),

    /// Failed to parse the TOML content.
    #[error("failed to parse config file: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Returns the default configuration file path for the current platform.
///
/// Uses the XDG Base Directory specification on Linux/macOS and appropriate
/// platform conventions on other systems via the `etcetera` crate.
///
/// Returns `None` if the platform's config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(
        strategy
            .config_dir()
            .join(crate::productinfo::PRODUCT_NAME)
            .join("config.toml"),
    )
}

/// Loads configuration from the specified path.
///
/// Note: This function sets `explicit_path` to `false`. Use `load_config` for
/// proper handling of explicit vs. default paths.
pub fn load_from_path(path: &Path) -> ConfigLoadResult {
    tracing::debug!(target: "config", "loading config from {}", path.display());

    let result = std::fs::read_to_string(path)
        .map_err(ConfigLoadError::Io)
        .and_then(|content| toml::from_str(&content).map_err(ConfigLoadError::Parse));

    match result {
        Ok(config) => ConfigLoadResult {
            config,
            path: Some(path.to_path_buf()),
            error: None,
            explicit_path: false,
        },
        Err(e) => ConfigLoadResult {
            config: Config::default(),
            path: Some(path.to_path_buf()),
            error: Some(e),
            explicit_path: false,
        },
    }
}

/// Loads configuration based on the provided options.
///
/// # Arguments
///
/// * `disabled` - If true, skip loading and return defaults
/// * `explicit_path` - If provided, use this path instead of the default
pub fn load_config(disabled: bool, explicit_path: Option<&Path>) -> ConfigLoadResult {
    let unloaded = |path| ConfigLoadResult {
        config: Config::default(),
        path,
        error: None,
        explicit_path: false,
    };

    if disabled {
        return unloaded(None);
    }

    let is_explicit = explicit_path.is_some();

    let path = match explicit_path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            // Can't determine config path; use defaults silently
            None => return unloaded(None),
        },
    };

    // If using default path and file doesn't exist, silently use defaults
    if !is_explicit && !path.exists() {
        tracing::debug!(target: "config", "no config file at {}", path.display());
        return unloaded(Some(path));
    }

    let mut result = load_from_path(&path);
    result.explicit_path = is_explicit;
    result
}
