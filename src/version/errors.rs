use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("no {target} call found")]
    CallNotFound { target: String },

    #[error(
        "unexpected number of {target} arguments at line {line}, \
         at least {required} required, {found} found"
    )]
    InsufficientArguments {
        target: String,
        line: usize,
        required: usize,
        found: usize,
    },

    #[error(
        "expected simple literal in argument {position} of {target}, \
         found {kind} `{text}` at {line}:{column}"
    )]
    NotSimpleLiteral {
        target: String,
        position: usize,
        kind: String,
        text: String,
        line: usize,
        column: usize,
    },

    #[error("literal {literal} at {line}:{column} is not a quoted version string")]
    LiteralPatternMismatch {
        literal: String,
        line: usize,
        column: usize,
    },

    #[error("new version {version:?} cannot be placed inside {quote}-quoted literal: {reason}")]
    UnsafeVersion {
        version: String,
        quote: char,
        reason: &'static str,
    },
}
