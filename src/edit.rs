use crate::version::VersionReplacement;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Before-text verification failed at byte {byte_start}: expected {expected:?}, found {found:?}")]
    BeforeTextMismatch {
        byte_start: usize,
        byte_end: usize,
        expected: String,
        found: String,
    },

    #[error("Invalid byte range: [{byte_start}, {byte_end}) in file of length {file_len}")]
    InvalidByteRange {
        byte_start: usize,
        byte_end: usize,
        file_len: usize,
    },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid edit would create malformed UTF-8")]
    InvalidUtf8Edit,
}

/// Splice a version replacement into the raw file content.
///
/// The bytes at the replacement span must still equal the original literal.
/// Returns a new buffer; `content` is left untouched.
pub fn apply_replacement(
    content: &[u8],
    replacement: &VersionReplacement,
) -> Result<Vec<u8>, EditError> {
    let range = replacement
        .byte_range()
        .filter(|range| range.end <= content.len())
        .ok_or_else(|| EditError::InvalidByteRange {
            byte_start: replacement.position().saturating_sub(1),
            byte_end: replacement.position().saturating_sub(1) + replacement.length(),
            file_len: content.len(),
        })?;

    let current = &content[range.clone()];
    if current != replacement.original().as_bytes() {
        return Err(EditError::BeforeTextMismatch {
            byte_start: range.start,
            byte_end: range.end,
            expected: replacement.original().to_string(),
            found: String::from_utf8_lossy(current).into_owned(),
        });
    }

    let new_text = replacement.value().as_bytes();
    let mut new_content = Vec::with_capacity(content.len() - range.len() + new_text.len());
    new_content.extend_from_slice(&content[..range.start]);
    new_content.extend_from_slice(new_text);
    new_content.extend_from_slice(&content[range.end..]);

    // Validate resulting content is valid UTF-8
    std::str::from_utf8(&new_content).map_err(|_| EditError::InvalidUtf8Edit)?;

    Ok(new_content)
}

/// Atomic file write: tempfile + fsync + rename.
///
/// The replacement file takes over the permission bits of the file at `path`.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), EditError> {
    // Create tempfile in same directory to ensure same filesystem
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = fs::metadata(path)?.permissions();
    let mut temp = tempfile::NamedTempFile::new_in(parent)?;

    temp.write_all(content)?;
    temp.as_file().set_permissions(permissions)?;

    // Flush to disk (fsync)
    temp.as_file().sync_all()?;

    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
