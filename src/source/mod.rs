//! Read-only virtual filesystem over a remote repository's contents API.
//!
//! The pipeline for every open is resolve → fetch → decode → handle:
//! [`resolve_repo_path`] normalizes the caller's path, a [`ContentsClient`]
//! fetches the raw response, [`decode_entry`] turns it into a tagged
//! [`Entry`], and a [`FileHandle`] exposes the result for reading or
//! listing. All write intent fails with [`FsError::Readonly`].

mod cache;
mod decode;
mod entry;
mod error;
mod github_fs;
mod handle;
mod memory;
mod path;
mod remote;

pub use cache::EntryCache;
pub use decode::decode_entry;
pub use entry::{ChildKind, ChildRef, DirectoryEntry, Entry, FileEntry, Metadata, OtherEntry};
pub use error::{FsError, Result};
pub use github_fs::{GitHubFs, OpenOptions};
pub use handle::FileHandle;
pub use memory::MemoryContentsClient;
pub use path::resolve_repo_path;
pub use remote::{
    classify_status, ContentsClient, GitHubContentsClient, RepoCoordinates, DEFAULT_API_BASE,
};
