//! The read-only filesystem adapter over a remote repository.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::source::cache::EntryCache;
use crate::source::decode::decode_entry;
use crate::source::entry::{ChildRef, Entry, Metadata};
use crate::source::error::{FsError, Result};
use crate::source::handle::FileHandle;
use crate::source::path::resolve_repo_path;
use crate::source::remote::{ContentsClient, GitHubContentsClient, RepoCoordinates};

/// Shared read-only guard.
///
/// The single place the read-only contract is decided, invoked by both the
/// adapter's `open_file` and the handle's write operations so the two
/// enforcement levels cannot drift.
pub(crate) fn guard_read_only(write_intent: bool) -> Result<()> {
    if write_intent {
        Err(FsError::Readonly)
    } else {
        Ok(())
    }
}

// =============================================================================
// OpenOptions
// =============================================================================

/// Options for opening a path, mirroring `std::fs::OpenOptions`.
///
/// On this filesystem only `read` can succeed: any write, append, create, or
/// truncate intent fails with [`FsError::Readonly`] before any remote call.
/// The permission mode is accepted for call-site compatibility and ignored.
#[derive(Debug, Clone, Default)]
pub struct OpenOptions {
    read: bool,
    write: bool,
    append: bool,
    create: bool,
    truncate: bool,
    mode: Option<u32>,
}

impl OpenOptions {
    /// Create a blank set of options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request read access.
    pub fn read(mut self, read: bool) -> Self {
        self.read = read;
        self
    }

    /// Request write access. Always rejected.
    pub fn write(mut self, write: bool) -> Self {
        self.write = write;
        self
    }

    /// Request append access. Always rejected.
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Request creation of a missing file. Always rejected.
    pub fn create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// Request truncation. Always rejected.
    pub fn truncate(mut self, truncate: bool) -> Self {
        self.truncate = truncate;
        self
    }

    /// Permission hint for created files. Ignored; nothing is ever created.
    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// True when any option implies mutating the remote.
    pub fn has_write_intent(&self) -> bool {
        self.write || self.append || self.create || self.truncate
    }
}

// =============================================================================
// GitHubFs
// =============================================================================

/// A virtual, read-only filesystem over one remote repository.
///
/// Each open is a self-contained resolve → fetch → decode pipeline; the
/// adapter holds no state between calls beyond its coordinates and the
/// optional entry cache, so one long-lived instance is safe to share across
/// concurrent callers. Callers fanning out over a subtree are responsible
/// for bounding their own concurrency against the remote rate limit.
pub struct GitHubFs {
    client: Arc<dyn ContentsClient>,
    cache: Option<EntryCache>,
}

impl GitHubFs {
    /// Create an adapter for the given repository coordinates.
    pub fn new(coords: RepoCoordinates) -> Self {
        Self::with_client(Arc::new(GitHubContentsClient::new(coords)))
    }

    /// Create an adapter over an arbitrary transport.
    pub fn with_client(client: Arc<dyn ContentsClient>) -> Self {
        Self {
            client,
            cache: None,
        }
    }

    /// Enable a read-through entry cache bounded to `capacity` entries.
    ///
    /// The cache lives and dies with this adapter instance.
    pub fn with_cache(mut self, capacity: NonZeroUsize) -> Self {
        self.cache = Some(EntryCache::new(capacity));
        self
    }

    /// Fetch and decode one normalized path, through the cache when enabled.
    async fn load(&self, repo_path: &str) -> Result<Arc<Entry>> {
        if let Some(cache) = &self.cache {
            if let Some(entry) = cache.get(repo_path).await {
                return Ok(entry);
            }
        }
        let body = self.client.fetch(repo_path).await?;
        let entry = Arc::new(decode_entry(repo_path, &body)?);
        if let Some(cache) = &self.cache {
            cache.put(repo_path, Arc::clone(&entry)).await;
        }
        Ok(entry)
    }

    /// Open a path for reading.
    ///
    /// `""` and `"/"` both denote the repository root. The returned handle
    /// is fully materialized; reading it issues no further remote calls.
    pub async fn open(&self, path: &str) -> Result<FileHandle> {
        let repo_path = resolve_repo_path(path)?;
        let entry = self.load(&repo_path).await?;
        Ok(FileHandle::new(entry))
    }

    /// Open a path with explicit options.
    ///
    /// Equivalent to [`GitHubFs::open`] for read-only options. Any write
    /// intent fails with [`FsError::Readonly`] unconditionally, before path
    /// resolution and without issuing any remote call.
    pub async fn open_file(&self, path: &str, options: &OpenOptions) -> Result<FileHandle> {
        guard_read_only(options.has_write_intent())?;
        self.open(path).await
    }

    /// Kind and size of the entry at a path.
    ///
    /// The contents API offers no cheaper metadata-only call, so this
    /// delegates to [`GitHubFs::open`] and discards the content.
    pub async fn stat(&self, path: &str) -> Result<Metadata> {
        Ok(self.open(path).await?.metadata())
    }

    /// List a directory's children in remote order.
    ///
    /// Fails with [`FsError::UnsupportedEntryKind`] when the path is not a
    /// directory.
    pub async fn read_dir(&self, path: &str) -> Result<Vec<ChildRef>> {
        Ok(self.open(path).await?.children()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MemoryContentsClient;

    fn listing_body(names: &[&str]) -> String {
        let elements: Vec<serde_json::Value> = names
            .iter()
            .map(|n| serde_json::json!({"name": n, "type": "file", "size": 1}))
            .collect();
        serde_json::Value::Array(elements).to_string()
    }

    fn fs_with(setup: impl FnOnce(&mut MemoryContentsClient)) -> (GitHubFs, Arc<MemoryContentsClient>) {
        let mut stub = MemoryContentsClient::new();
        setup(&mut stub);
        let client = Arc::new(stub);
        (GitHubFs::with_client(Arc::clone(&client) as Arc<dyn ContentsClient>), client)
    }

    #[tokio::test]
    async fn test_open_reads_exact_bytes() {
        let fixture: &[u8] = b"FROM alpine:3.20\nCOPY . /app\n";
        let (fs, _) = fs_with(|stub| stub.insert_file("Dockerfile", fixture));

        let mut handle = fs.open("Dockerfile").await.unwrap();
        let mut out = Vec::new();
        let mut buf = [0u8; 8];
        loop {
            let n = handle.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
        }
        assert_eq!(out, fixture);
        assert_eq!(handle.content().unwrap(), &bytes::Bytes::copy_from_slice(fixture));
    }

    #[tokio::test]
    async fn test_write_intent_fails_without_network() {
        let (fs, client) = fs_with(|stub| stub.insert_file("readme.md", b"hi"));

        for path in ["readme.md", "", "no/such/path"] {
            let result = fs
                .open_file(path, &OpenOptions::new().read(true).write(true))
                .await;
            assert!(matches!(result, Err(FsError::Readonly)), "path {:?}", path);
        }
        let result = fs
            .open_file("readme.md", &OpenOptions::new().append(true).mode(0o644))
            .await;
        assert!(matches!(result, Err(FsError::Readonly)));
        let result = fs.open_file("readme.md", &OpenOptions::new().create(true)).await;
        assert!(matches!(result, Err(FsError::Readonly)));
        let result = fs
            .open_file("readme.md", &OpenOptions::new().truncate(true))
            .await;
        assert!(matches!(result, Err(FsError::Readonly)));

        assert_eq!(client.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_read_only_open_file_matches_open() {
        let (fs, _) = fs_with(|stub| stub.insert_file("a.txt", b"abc"));
        let handle = fs
            .open_file("a.txt", &OpenOptions::new().read(true))
            .await
            .unwrap();
        assert_eq!(handle.content().unwrap().as_ref(), b"abc");
    }

    #[tokio::test]
    async fn test_root_forms_identical_listing() {
        let (fs, _) = fs_with(|stub| stub.insert_body("", listing_body(&["src", "readme.md"])));

        let from_empty = fs.read_dir("").await.unwrap();
        let from_slash = fs.read_dir("/").await.unwrap();
        let names = |children: &[ChildRef]| {
            children.iter().map(|c| c.name.clone()).collect::<Vec<_>>()
        };
        assert_eq!(names(&from_empty), vec!["src", "readme.md"]);
        assert_eq!(names(&from_empty), names(&from_slash));
    }

    #[tokio::test]
    async fn test_traversal_fails_before_network() {
        let (fs, client) = fs_with(|_| {});
        let result = fs.open("../escape").await;
        assert!(matches!(result, Err(FsError::InvalidPath(_))));
        assert_eq!(client.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_remote_errors_surface_verbatim() {
        let (fs, _) = fs_with(|stub| {
            stub.insert_status("forbidden.txt", 403);
            stub.insert_body("garbled.json", &b"{oops"[..]);
        });

        assert!(matches!(
            fs.open("missing.txt").await,
            Err(FsError::NotFound(_))
        ));
        assert!(matches!(
            fs.open("forbidden.txt").await,
            Err(FsError::AccessDenied { .. })
        ));
        assert!(matches!(
            fs.open("garbled.json").await,
            Err(FsError::CorruptContent(_))
        ));
    }

    #[tokio::test]
    async fn test_listing_order_preserved() {
        let (fs, _) = fs_with(|stub| stub.insert_body("src", listing_body(&["z", "a", "m"])));
        let children = fs.read_dir("src").await.unwrap();
        let names: Vec<&str> = children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[tokio::test]
    async fn test_reiteration_and_cache_add_no_fetches() {
        let mut stub = MemoryContentsClient::new();
        stub.insert_body("src", listing_body(&["a", "b"]));
        let client = Arc::new(stub);
        let fs = GitHubFs::with_client(Arc::clone(&client) as Arc<dyn ContentsClient>)
            .with_cache(NonZeroUsize::new(16).unwrap());

        let handle = fs.open("src").await.unwrap();
        assert_eq!(client.fetch_count(), 1);

        let first: Vec<String> = handle.children().unwrap().iter().map(|c| c.name.clone()).collect();
        let second: Vec<String> = handle.children().unwrap().iter().map(|c| c.name.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(client.fetch_count(), 1);

        // Re-opening the same path is served by the read-through cache.
        fs.open("src").await.unwrap();
        assert_eq!(client.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_stat_kinds() {
        let (fs, _) = fs_with(|stub| {
            stub.insert_file("a.txt", b"abcd");
            stub.insert_body("src", listing_body(&["x"]));
            stub.insert_body(
                "link",
                serde_json::json!({"name": "link", "type": "symlink", "size": 0})
                    .to_string()
                    .into_bytes(),
            );
        });

        let meta = fs.stat("a.txt").await.unwrap();
        assert_eq!(meta.kind, crate::source::entry::ChildKind::File);
        assert_eq!(meta.size, 4);

        let meta = fs.stat("src").await.unwrap();
        assert_eq!(meta.kind, crate::source::entry::ChildKind::Dir);

        // A present symlink stats fine; only reading its content fails.
        let meta = fs.stat("link").await.unwrap();
        assert_eq!(meta.kind, crate::source::entry::ChildKind::Other);
        let handle = fs.open("link").await.unwrap();
        assert!(matches!(
            handle.content(),
            Err(FsError::UnsupportedEntryKind(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_opens_independent() {
        let mut stub = MemoryContentsClient::new();
        for i in 0..32 {
            stub.insert_file(format!("f{}.txt", i), format!("content-{}", i).as_bytes());
        }
        let client = Arc::new(stub);
        let fs = Arc::new(GitHubFs::with_client(Arc::clone(&client) as Arc<dyn ContentsClient>));

        let mut tasks = Vec::new();
        for i in 0..32 {
            let fs = Arc::clone(&fs);
            tasks.push(tokio::spawn(async move {
                let handle = fs.open(&format!("f{}.txt", i)).await.unwrap();
                assert_eq!(
                    handle.content().unwrap().as_ref(),
                    format!("content-{}", i).as_bytes()
                );
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(client.fetch_count(), 32);
    }

    #[tokio::test]
    async fn test_entry_path_matches_resolved_path() {
        let (fs, _) = fs_with(|stub| stub.insert_file("src/lib.rs", b"pub mod x;"));
        let handle = fs.open("/src//./lib.rs").await.unwrap();
        assert_eq!(handle.path(), "src/lib.rs");
    }
}
