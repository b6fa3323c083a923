//! githubfs-rs - A read-only virtual filesystem over GitHub repositories.

pub mod cli;
pub mod source;

pub use source::{
    ChildKind, ChildRef, ContentsClient, DirectoryEntry, Entry, FileEntry, FileHandle, FsError,
    GitHubContentsClient, GitHubFs, MemoryContentsClient, Metadata, OpenOptions, OtherEntry,
    RepoCoordinates, Result,
};
