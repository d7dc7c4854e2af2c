use crate::ts::locator::{locate_call, CallSite, CallTarget};
use crate::ts::parser::ParsedSource;
use crate::version::errors::VersionError;
use crate::version::literal::{unsafe_reason, LiteralParts};
use std::ops::Range;
use tracing::debug;

/// Zero-based index of the version argument (`docopt.Parse(doc, argv, help, version, ...)`).
pub const VERSION_ARGUMENT_INDEX: usize = 3;

/// Node kinds of Go basic literals.
pub const BASIC_LITERAL_KINDS: &[&str] = &[
    "interpreted_string_literal",
    "raw_string_literal",
    "rune_literal",
    "int_literal",
    "float_literal",
    "imaginary_literal",
];

/// A computed literal rewrite.
///
/// `position` is the 1-indexed byte offset of the literal's opening quote and
/// `length` the byte length of the original literal, quotes included.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "VersionReplacement does nothing until spliced into the file"]
pub struct VersionReplacement {
    position: usize,
    length: usize,
    original: String,
    value: String,
}

impl VersionReplacement {
    pub fn new(position: usize, original: impl Into<String>, value: impl Into<String>) -> Self {
        let original = original.into();
        Self {
            position,
            length: original.len(),
            original,
            value: value.into(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// The literal text currently in the file.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The fully quoted literal to write.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Zero-based byte range of the original literal, if `position` is valid.
    pub fn byte_range(&self) -> Option<Range<usize>> {
        let start = self.position.checked_sub(1)?;
        Some(start..start + self.length)
    }

    /// Whether the rewrite leaves the literal unchanged.
    pub fn is_noop(&self) -> bool {
        self.original == self.value
    }
}

/// Validate a located call site and compute the rewrite of its version literal.
pub fn build_replacement(
    parsed: &ParsedSource<'_>,
    site: &CallSite<'_>,
    target: &CallTarget,
    new_version: &str,
) -> Result<VersionReplacement, VersionError> {
    let arguments = site.positional_arguments();
    let Some(argument) = arguments.get(VERSION_ARGUMENT_INDEX) else {
        return Err(VersionError::InsufficientArguments {
            target: target.to_string(),
            line: site.line(),
            required: VERSION_ARGUMENT_INDEX + 1,
            found: arguments.len(),
        });
    };

    let raw = parsed.node_text(*argument);
    let start = argument.start_position();
    if !BASIC_LITERAL_KINDS.contains(&argument.kind()) {
        return Err(VersionError::NotSimpleLiteral {
            target: target.to_string(),
            position: VERSION_ARGUMENT_INDEX + 1,
            kind: argument.kind().to_string(),
            text: raw.to_string(),
            line: start.row + 1,
            column: start.column + 1,
        });
    }

    let parts = LiteralParts::parse(raw).ok_or_else(|| VersionError::LiteralPatternMismatch {
        literal: raw.to_string(),
        line: start.row + 1,
        column: start.column + 1,
    })?;

    if let Some(reason) = unsafe_reason(parts.quote, new_version) {
        return Err(VersionError::UnsafeVersion {
            version: new_version.to_string(),
            quote: parts.quote,
            reason,
        });
    }

    let replacement =
        VersionReplacement::new(argument.start_byte() + 1, raw, parts.with_value(new_version));
    debug!(
        position = replacement.position(),
        length = replacement.length(),
        from = %replacement.original(),
        to = %replacement.value(),
        "computed version replacement"
    );
    Ok(replacement)
}

/// Locate the first call to `target` and compute its version rewrite.
pub fn locate_replacement(
    parsed: &ParsedSource<'_>,
    target: &CallTarget,
    new_version: &str,
) -> Result<VersionReplacement, VersionError> {
    let site = locate_call(parsed, target).ok_or_else(|| VersionError::CallNotFound {
        target: target.to_string(),
    })?;
    build_replacement(parsed, &site, target, new_version)
}
