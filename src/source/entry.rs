//! Decoded entry types for one remote path.

use bytes::Bytes;

/// The kind of a child in a directory listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    /// A regular file.
    File,
    /// A directory.
    Dir,
    /// A symlink, submodule, or other unreadable entry.
    Other,
}

/// A reference to one child of a directory.
///
/// `name` is a single path segment with no separators. `size` is only
/// meaningful for file children.
#[derive(Debug, Clone)]
pub struct ChildRef {
    /// Base name of the child.
    pub name: String,
    /// Kind of the child.
    pub kind: ChildKind,
    /// Size in bytes (files only; 0 for directories).
    pub size: u64,
}

/// A fully materialized file.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// Size in bytes as reported by the remote.
    pub size: u64,
    /// The file's content, fully fetched.
    pub content: Bytes,
}

/// A directory listing.
///
/// Children are kept in the order the remote API returned them; no sort is
/// imposed. Callers that need a deterministic order must sort themselves,
/// since remote ordering is platform-defined and may change.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// Children in remote order.
    pub children: Vec<ChildRef>,
}

/// An entry that exists but is neither a file nor a directory, such as a
/// symlink or a git submodule. Its content cannot be read.
#[derive(Debug, Clone)]
pub struct OtherEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// The remote's type discriminator (e.g. "symlink", "submodule").
    pub kind: String,
}

/// The decoded result of fetching one path.
///
/// Decided once at decode time; callers match on the variant instead of
/// inspecting response shapes.
#[derive(Debug, Clone)]
pub enum Entry {
    /// A file with materialized content.
    File(FileEntry),
    /// A directory with its child listing.
    Directory(DirectoryEntry),
    /// A present but unreadable entry.
    Other(OtherEntry),
}

impl Entry {
    /// Path relative to the repository root. Always equals the normalized
    /// path that produced this entry.
    pub fn path(&self) -> &str {
        match self {
            Entry::File(f) => &f.path,
            Entry::Directory(d) => &d.path,
            Entry::Other(o) => &o.path,
        }
    }

    /// True if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory(_))
    }

    /// Size in bytes (files only; 0 otherwise).
    pub fn size(&self) -> u64 {
        match self {
            Entry::File(f) => f.size,
            _ => 0,
        }
    }

    /// The kind of this entry as a [`ChildKind`].
    pub fn kind(&self) -> ChildKind {
        match self {
            Entry::File(_) => ChildKind::File,
            Entry::Directory(_) => ChildKind::Dir,
            Entry::Other(_) => ChildKind::Other,
        }
    }
}

/// Metadata about one path, as returned by `stat`.
#[derive(Debug, Clone)]
pub struct Metadata {
    /// Path relative to the repository root.
    pub path: String,
    /// Kind of the entry.
    pub kind: ChildKind,
    /// Size in bytes (files only; 0 otherwise).
    pub size: u64,
}

impl Metadata {
    /// Derive metadata from a decoded entry.
    pub fn from_entry(entry: &Entry) -> Self {
        Metadata {
            path: entry.path().to_string(),
            kind: entry.kind(),
            size: entry.size(),
        }
    }
}
