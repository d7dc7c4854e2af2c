use crate::ts::errors::TreeSitterError;
use crate::ts::parser::{ErrorNode, GoParser};

/// Validate that a rewrite doesn't introduce syntax errors.
///
/// Compares ERROR nodes of the original and patched sources. Errors are
/// matched by their distance from the end of the file, so errors after the
/// edit still line up when the replacement changed the length.
pub fn validate_rewrite(original: &str, patched: &str) -> Result<(), TreeSitterError> {
    let mut parser = GoParser::new()?;

    let original_errors = parser.parse_with_source(original)?.error_nodes();
    let new_errors = parser.parse_with_source(patched)?.error_nodes();

    let introduced: Vec<&ErrorNode> = new_errors
        .iter()
        .filter(|e| {
            !original_errors.iter().any(|o| {
                (o.byte_start == e.byte_start && o.byte_end == e.byte_end)
                    || (original.len() - o.byte_end == patched.len() - e.byte_end
                        && o.byte_end - o.byte_start == e.byte_end - e.byte_start)
            })
        })
        .collect();

    match introduced.as_slice() {
        [] => Ok(()),
        [only] => Err(TreeSitterError::SyntaxError {
            byte_start: only.byte_start,
            byte_end: only.byte_end,
            line: only.start_point.row + 1,
            column: only.start_point.column + 1,
        }),
        [first, ..] => Err(TreeSitterError::MultipleSyntaxErrors {
            count: introduced.len(),
            line: first.start_point.row + 1,
            column: first.start_point.column + 1,
        }),
    }
}
