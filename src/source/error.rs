use thiserror::Error;

/// Errors that can occur when reading from a remote repository filesystem.
///
/// Each layer of the pipeline produces only its own classes: path resolution
/// produces `InvalidPath`, the remote client produces transport
/// classifications, the decoder produces content classifications, and the
/// adapter itself produces `Readonly`. No layer rewraps an error from the
/// layer below it.
#[derive(Debug, Error)]
pub enum FsError {
    /// The path escapes the repository root or is otherwise malformed.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The path does not exist at the configured revision.
    #[error("not found: {0}")]
    NotFound(String),

    /// The credential was rejected or the rate limit is exhausted.
    #[error("access denied: {path} (rate limited: {rate_limited})")]
    AccessDenied {
        /// Path the request targeted.
        path: String,
        /// True when the response carried an explicit rate-limit marker.
        rate_limited: bool,
    },

    /// A network-level failure or a 5xx response; retrying may succeed.
    #[error("transient failure: {0}")]
    Transient(String),

    /// The response body could not be decoded into an entry.
    #[error("corrupt content: {0}")]
    CorruptContent(String),

    /// The remote declined to inline the file's content.
    #[error("content too large: {0}")]
    ContentTooLarge(String),

    /// The entry exists but is neither a file nor a directory.
    #[error("unsupported entry kind: {0}")]
    UnsupportedEntryKind(String),

    /// A write, append, create, or truncate operation was attempted.
    #[error("filesystem is read-only")]
    Readonly,

    /// An HTTP outcome that fits no other class.
    #[error("unclassified response (status {status}): {path}")]
    Unclassified {
        /// HTTP status code returned by the remote.
        status: u16,
        /// Path the request targeted.
        path: String,
    },
}

/// Result type for repository filesystem operations.
pub type Result<T> = std::result::Result<T, FsError>;
