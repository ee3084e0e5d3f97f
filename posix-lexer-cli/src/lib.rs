//! Command-line front end for POSIX shell token recognition.

pub mod args;
pub mod config;
pub mod entry;
pub mod error;
mod error_formatter;
pub mod events;
pub mod output;
mod productinfo;
