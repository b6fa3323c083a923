//! Decoding of contents API responses into [`Entry`] values.
//!
//! The contents endpoint returns a JSON object for a single file (or
//! symlink/submodule) and a JSON array for a directory listing. The shape is
//! decided here, once, and surfaced as a tagged [`Entry`] variant so call
//! sites never inspect response shapes themselves.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::source::entry::{ChildKind, ChildRef, DirectoryEntry, Entry, FileEntry, OtherEntry};
use crate::source::error::{FsError, Result};

/// One element of a contents API response, shared by single-object and
/// listing shapes.
#[derive(Debug, Deserialize)]
struct WireEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    size: u64,
    content: Option<String>,
    encoding: Option<String>,
}

fn child_kind(kind: &str) -> ChildKind {
    match kind {
        "file" => ChildKind::File,
        "dir" => ChildKind::Dir,
        _ => ChildKind::Other,
    }
}

/// Decode one raw response body into an [`Entry`] for the given normalized
/// repository path.
///
/// The resulting entry's `path` is always `repo_path`, not whatever path the
/// remote echoed back.
pub fn decode_entry(repo_path: &str, body: &[u8]) -> Result<Entry> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| FsError::CorruptContent(format!("{}: {}", repo_path, e)))?;

    match value {
        Value::Array(elements) => decode_listing(repo_path, elements),
        Value::Object(_) => decode_single(repo_path, value),
        _ => Err(FsError::CorruptContent(format!(
            "{}: response is neither an object nor an array",
            repo_path
        ))),
    }
}

/// Decode a directory listing, preserving remote order.
///
/// Any element missing required fields fails the whole call; no partial
/// listing is surfaced.
fn decode_listing(repo_path: &str, elements: Vec<Value>) -> Result<Entry> {
    let mut children = Vec::with_capacity(elements.len());
    for element in elements {
        let wire: WireEntry = serde_json::from_value(element)
            .map_err(|e| FsError::CorruptContent(format!("{}: {}", repo_path, e)))?;
        children.push(ChildRef {
            kind: child_kind(&wire.kind),
            size: wire.size,
            name: wire.name,
        });
    }
    Ok(Entry::Directory(DirectoryEntry {
        path: repo_path.to_string(),
        children,
    }))
}

fn decode_single(repo_path: &str, value: Value) -> Result<Entry> {
    let wire: WireEntry = serde_json::from_value(value)
        .map_err(|e| FsError::CorruptContent(format!("{}: {}", repo_path, e)))?;

    match wire.kind.as_str() {
        "file" => decode_file(repo_path, wire),
        // The contents endpoint lists directories as arrays; a lone "dir"
        // object carries no children.
        "dir" => Ok(Entry::Directory(DirectoryEntry {
            path: repo_path.to_string(),
            children: Vec::new(),
        })),
        _ => Ok(Entry::Other(OtherEntry {
            path: repo_path.to_string(),
            kind: wire.kind,
        })),
    }
}

fn decode_file(repo_path: &str, wire: WireEntry) -> Result<Entry> {
    match wire.encoding.as_deref() {
        Some("base64") => {
            let encoded = wire.content.ok_or_else(|| {
                FsError::CorruptContent(format!("{}: base64 file without content", repo_path))
            })?;
            // The API wraps base64 payloads in newlines.
            let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
            let content = STANDARD
                .decode(cleaned.as_bytes())
                .map_err(|e| FsError::CorruptContent(format!("{}: {}", repo_path, e)))?;
            Ok(Entry::File(FileEntry {
                path: repo_path.to_string(),
                size: wire.size,
                content: Bytes::from(content),
            }))
        }
        // "none" is the API's marker for content it declines to inline.
        Some("none") | None => Err(FsError::ContentTooLarge(repo_path.to_string())),
        Some(other) => Err(FsError::CorruptContent(format!(
            "{}: unknown encoding {:?}",
            repo_path, other
        ))),
    }
}
