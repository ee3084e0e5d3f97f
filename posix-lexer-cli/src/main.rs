//! Entry point for the `posix-lex` command.

fn main() {
    posix_lexer_cli::entry::run();
}
