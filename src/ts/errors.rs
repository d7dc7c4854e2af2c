use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeSitterError {
    #[error("failed to set language for parser")]
    LanguageSet,

    #[error("failed to parse source code")]
    ParseFailed,

    #[error("syntax error detected at {line}:{column} (byte {byte_start}..{byte_end})")]
    SyntaxError {
        byte_start: usize,
        byte_end: usize,
        line: usize,
        column: usize,
    },

    #[error("multiple syntax errors detected: {count} ERROR nodes, first at {line}:{column}")]
    MultipleSyntaxErrors {
        count: usize,
        line: usize,
        column: usize,
    },
}
