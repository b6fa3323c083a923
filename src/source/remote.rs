//! Remote transport for the GitHub repository contents API.
//!
//! [`ContentsClient`] abstracts the transport so the adapter can run against
//! the real API or an in-memory stub. [`GitHubContentsClient`] is the HTTP
//! implementation: one authenticated GET per fetched path, no retries.

use async_trait::async_trait;
use bytes::Bytes;
use percent_encoding::{percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, StatusCode};

use crate::source::error::{FsError, Result};

/// Default API base URL for github.com.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// The characters that must be escaped inside a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}');

// =============================================================================
// Configuration
// =============================================================================

/// Immutable coordinates identifying which remote repository every call
/// targets.
///
/// Supplied once at construction. Multiple adapters with different
/// coordinates are independent within one process.
#[derive(Debug, Clone)]
pub struct RepoCoordinates {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Authentication token. Absence is valid but subjects calls to the
    /// unauthenticated rate limit.
    pub token: Option<String>,
    /// Branch, tag, or commit to read at. Defaults to the repository's
    /// default branch when absent.
    pub revision: Option<String>,
    /// API base URL override (for GitHub Enterprise or test servers).
    pub api_base: Option<String>,
}

impl RepoCoordinates {
    /// Create coordinates for the given owner and repository name.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: None,
            revision: None,
            api_base: None,
        }
    }

    /// Set the authentication token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the revision (branch, tag, or commit) to read at.
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = Some(revision.into());
        self
    }

    /// Set a custom API base URL.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into().trim_end_matches('/').to_string());
        self
    }
}

// =============================================================================
// ContentsClient Trait
// =============================================================================

/// Transport interface for fetching one path's raw contents response.
///
/// Implementations perform exactly one request per call and classify the
/// outcome into the [`FsError`] taxonomy. Retry policy, if any, belongs in a
/// wrapper around this trait, not inside implementations.
#[async_trait]
pub trait ContentsClient: Send + Sync {
    /// Fetch the raw JSON body for a normalized repository path.
    ///
    /// An empty path denotes the repository root.
    async fn fetch(&self, repo_path: &str) -> Result<Bytes>;
}

// =============================================================================
// GitHubContentsClient
// =============================================================================

/// HTTP implementation of [`ContentsClient`] against the GitHub contents
/// endpoint.
///
/// Each call issues one authenticated GET and consumes one unit of the
/// remote rate-limit quota. Quota exhaustion is surfaced as
/// [`FsError::AccessDenied`] with `rate_limited` set; it is never tracked or
/// pre-empted here.
pub struct GitHubContentsClient {
    client: Client,
    coords: RepoCoordinates,
}

impl GitHubContentsClient {
    /// Create a client for the given coordinates.
    pub fn new(coords: RepoCoordinates) -> Self {
        Self {
            client: Client::new(),
            coords,
        }
    }

    /// Create a client with a custom reqwest client (for timeouts, proxies).
    pub fn with_client(client: Client, coords: RepoCoordinates) -> Self {
        Self { client, coords }
    }

    fn contents_url(&self, repo_path: &str) -> String {
        let base = self
            .coords
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE);
        let encoded: Vec<String> = repo_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_encode(s.as_bytes(), SEGMENT).to_string())
            .collect();
        format!(
            "{}/repos/{}/{}/contents/{}",
            base,
            self.coords.owner,
            self.coords.repo,
            encoded.join("/")
        )
    }
}

#[async_trait]
impl ContentsClient for GitHubContentsClient {
    async fn fetch(&self, repo_path: &str) -> Result<Bytes> {
        let url = self.contents_url(repo_path);
        tracing::debug!(%url, "fetching repository contents");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "githubfs-rs");

        if let Some(token) = &self.coords.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(revision) = &self.coords.revision {
            request = request.query(&[("ref", revision)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FsError::Transient(e.to_string()))?;

        let status = response.status();
        let rate_limited = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == "0")
            .unwrap_or(false);

        if status == StatusCode::OK {
            return response
                .bytes()
                .await
                .map_err(|e| FsError::Transient(e.to_string()));
        }
        Err(classify_status(status.as_u16(), rate_limited, repo_path))
    }
}

/// Classify a non-200 HTTP status into the error taxonomy.
///
/// Shared with the in-memory stub client so tests exercise the same mapping
/// the real transport uses.
pub fn classify_status(status: u16, rate_limited: bool, repo_path: &str) -> FsError {
    match status {
        404 => FsError::NotFound(repo_path.to_string()),
        401 | 403 => FsError::AccessDenied {
            path: repo_path.to_string(),
            rate_limited,
        },
        500..=599 => FsError::Transient(format!("server error {} for {}", status, repo_path)),
        status => FsError::Unclassified {
            status,
            path: repo_path.to_string(),
        },
    }
}
