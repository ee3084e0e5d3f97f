//! Example demonstrating token serialization with the `serde` feature.
//!
//! Run with: `cargo run --package posix-lexer --example serde --features serde`

use posix_lexer::{Tokenizer, TokenizerOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Tokenize a simple shell command
    let input = "echo 'Hello, World!' && ls -la";
    let mut reader = input.as_bytes();
    let options = TokenizerOptions::default();

    let tokens = Tokenizer::new(&mut reader, &options).collect::<Result<Vec<_>, _>>()?;

    // Serialize the tokens to JSON
    let json = serde_json::to_string_pretty(&tokens)?;
    println!("Tokens:");
    println!("{json}");

    Ok(())
}
