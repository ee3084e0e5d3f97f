use crate::error::CliError;

#[derive(Debug, Default, Clone)]
pub(crate) struct Formatter {
    pub use_color: bool,
}

impl Formatter {
    pub fn format_error(&self, err: &CliError) -> String {
        let prefix = if self.use_color {
            color_print::cstr!("<red>error:</red> ")
        } else {
            "error: "
        };

        std::format!("{prefix}{err}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_prefix_without_color() {
        let err = CliError::Tokenize(posix_lexer::TokenizerError::FailedDecoding);
        let formatter = Formatter { use_color: false };
        assert_eq!(
            formatter.format_error(&err),
            "error: failed to decode UTF-8 characters\n"
        );
    }

    #[test]
    fn colored_prefix_keeps_message() {
        let err = CliError::Tokenize(posix_lexer::TokenizerError::FailedDecoding);
        let formatter = Formatter { use_color: true };
        let formatted = formatter.format_error(&err);
        assert!(formatted.contains("\u{1b}["));
        assert!(formatted.ends_with("failed to decode UTF-8 characters\n"));
    }
}
