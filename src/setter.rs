//! End-to-end version update of a single Go file.
//!
//! read → parse → locate → build replacement → splice → re-validate → write.
//! Everything before the write happens in memory, so a failing step never
//! touches the file.

use crate::edit::{apply_replacement, atomic_write, EditError};
use crate::ts::{count_calls, validate_rewrite, CallTarget, GoParser, TreeSitterError};
use crate::version::{locate_replacement, VersionError, VersionReplacement};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum SetError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8: {source}")]
    NotUtf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("failed to parse source: {0}")]
    Parse(#[from] TreeSitterError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("rewrite would introduce a syntax error: {0}")]
    IntroducedSyntaxError(#[source] TreeSitterError),
}

/// Options controlling [`set_version`].
#[derive(Debug, Clone, Default)]
pub struct SetOptions {
    /// Call whose version argument is rewritten
    pub target: CallTarget,
    /// Compute the change without writing it
    pub dry_run: bool,
}

/// A rewrite computed entirely in memory.
#[derive(Debug, Clone)]
pub struct PlannedUpdate {
    pub replacement: VersionReplacement,
    /// 1-based line of the literal
    pub line: usize,
    /// 1-based byte column of the literal
    pub column: usize,
    /// Full source after the rewrite
    pub patched: String,
}

/// What [`set_version`] did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetStatus {
    /// The literal was rewritten and the file saved
    Applied,
    /// The literal already carried the requested version; nothing written
    AlreadyApplied,
    /// Dry run; the file was left untouched
    DryRun,
}

/// Result of a version update.
#[derive(Debug, Clone)]
#[must_use = "SetReport should be checked for the applied status"]
pub struct SetReport {
    pub file: PathBuf,
    pub status: SetStatus,
    pub update: PlannedUpdate,
    pub original: String,
}

/// Compute the version rewrite of `source` without touching the filesystem.
pub fn plan_update(
    source: &str,
    target: &CallTarget,
    new_version: &str,
) -> Result<PlannedUpdate, SetError> {
    let mut parser = GoParser::new()?;
    let parsed = parser.parse_with_source(source)?;
    parsed.ensure_valid()?;

    let calls = count_calls(&parsed, target);
    if calls > 1 {
        warn!(call = %target, calls, "multiple call sites found, rewriting the first one");
    }

    let replacement = locate_replacement(&parsed, target, new_version)?;
    let patched = apply_replacement(source.as_bytes(), &replacement)?;
    let patched = String::from_utf8(patched).map_err(|_| EditError::InvalidUtf8Edit)?;

    validate_rewrite(source, &patched).map_err(SetError::IntroducedSyntaxError)?;

    let (line, column) = line_column(source, replacement.position() - 1);
    Ok(PlannedUpdate {
        replacement,
        line,
        column,
        patched,
    })
}

/// Rewrite the version literal of the first `options.target` call in `path`.
pub fn set_version(
    path: impl AsRef<Path>,
    new_version: &str,
    options: &SetOptions,
) -> Result<SetReport, SetError> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| SetError::Io {
        path: path.to_path_buf(),
        source,
    };

    let raw = fs::read(path).map_err(io_error)?;
    let original = String::from_utf8(raw).map_err(|e| SetError::NotUtf8 {
        path: path.to_path_buf(),
        source: e.utf8_error(),
    })?;
    debug!(file = %path.display(), bytes = original.len(), "read source");

    let update = plan_update(&original, &options.target, new_version)?;

    let status = if update.replacement.is_noop() {
        SetStatus::AlreadyApplied
    } else if options.dry_run {
        SetStatus::DryRun
    } else {
        // Write through symlinks: the rename must land on the link's target
        let resolved = fs::canonicalize(path).map_err(io_error)?;
        atomic_write(&resolved, update.patched.as_bytes())?;
        debug!(file = %resolved.display(), "wrote patched source");
        SetStatus::Applied
    };

    Ok(SetReport {
        file: path.to_path_buf(),
        status,
        update,
        original,
    })
}

/// 1-based line and byte column of a byte offset.
fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |idx| idx + 1);
    (line, offset - line_start + 1)
}
