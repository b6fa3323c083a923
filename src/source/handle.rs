//! In-memory handles over already-fetched entries.

use std::sync::Arc;

use bytes::Bytes;

use crate::source::entry::{ChildRef, Entry, Metadata};
use crate::source::error::{FsError, Result};
use crate::source::github_fs::guard_read_only;

/// A handle over one fully fetched entry.
///
/// Purely local memory: reads and child iteration never issue remote calls,
/// and dropping a handle releases nothing beyond its own allocation. For
/// files the handle carries a cursor for sequential reads; for directories
/// it exposes the materialized child list, which can be re-iterated any
/// number of times.
///
/// The read-only contract is enforced here as well as on the adapter, so it
/// cannot be bypassed by holding a handle directly.
pub struct FileHandle {
    entry: Arc<Entry>,
    cursor: usize,
}

impl FileHandle {
    pub(crate) fn new(entry: Arc<Entry>) -> Self {
        Self { entry, cursor: 0 }
    }

    /// The decoded entry backing this handle.
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Path of this entry relative to the repository root.
    pub fn path(&self) -> &str {
        self.entry.path()
    }

    /// True if this handle is over a directory.
    pub fn is_dir(&self) -> bool {
        self.entry.is_dir()
    }

    /// Metadata for this entry.
    pub fn metadata(&self) -> Metadata {
        Metadata::from_entry(&self.entry)
    }

    /// The file's full content.
    ///
    /// Fails with [`FsError::UnsupportedEntryKind`] for directories and
    /// symlink/submodule entries.
    pub fn content(&self) -> Result<&Bytes> {
        match self.entry.as_ref() {
            Entry::File(f) => Ok(&f.content),
            other => Err(FsError::UnsupportedEntryKind(other.path().to_string())),
        }
    }

    /// Read up to `buf.len()` bytes at the cursor, advancing it.
    ///
    /// Reading at or past end of content returns `Ok(0)`, never an error.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let content = self.content()?;
        if self.cursor >= content.len() {
            return Ok(0);
        }
        let n = buf.len().min(content.len() - self.cursor);
        buf[..n].copy_from_slice(&content[self.cursor..self.cursor + n]);
        self.cursor += n;
        Ok(n)
    }

    /// Move the cursor to an absolute offset.
    ///
    /// Seeking past end of content is allowed; subsequent reads return 0.
    pub fn seek(&mut self, offset: u64) -> Result<u64> {
        self.content()?;
        self.cursor = offset as usize;
        Ok(offset)
    }

    /// The directory's children, in the order the remote returned them.
    ///
    /// Re-iterating the returned slice walks the already-materialized list;
    /// no remote calls are made. Fails with
    /// [`FsError::UnsupportedEntryKind`] for non-directories.
    pub fn children(&self) -> Result<&[ChildRef]> {
        match self.entry.as_ref() {
            Entry::Directory(d) => Ok(&d.children),
            other => Err(FsError::UnsupportedEntryKind(other.path().to_string())),
        }
    }

    /// Always fails with [`FsError::Readonly`].
    pub fn write(&mut self, _buf: &[u8]) -> Result<usize> {
        guard_read_only(true)?;
        Ok(0)
    }

    /// Always fails with [`FsError::Readonly`].
    pub fn set_len(&mut self, _len: u64) -> Result<()> {
        guard_read_only(true)
    }
}
