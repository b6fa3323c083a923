//! Path normalization for repository-relative paths.
//!
//! Repository paths use "/" as the separator regardless of the host OS.
//! The empty string denotes the repository root, matching the contents
//! API's empty-path convention.

use crate::source::error::{FsError, Result};

/// Normalize a repository-relative path for use as the contents API path
/// parameter.
///
/// Leading and trailing separators are stripped and repeated separators
/// collapse, so `""`, `"/"`, and `"//"` all resolve to the repository root
/// (the empty string). `.` segments are dropped and `..` segments are
/// resolved; a path that would escape the repository root fails with
/// [`FsError::InvalidPath`].
///
/// Pure and deterministic: no I/O, same input always yields same output.
pub fn resolve_repo_path(path: &str) -> Result<String> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    return Err(FsError::InvalidPath(path.to_string()));
                }
            }
            _ => segments.push(segment),
        }
    }

    Ok(segments.join("/"))
}
