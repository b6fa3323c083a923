//! In-memory stub implementation of [`ContentsClient`] for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;

use crate::source::error::{FsError, Result};
use crate::source::remote::{classify_status, ContentsClient};

/// A canned response for one path.
#[derive(Debug, Clone)]
enum Canned {
    /// A raw response body, returned as a 200.
    Body(Bytes),
    /// A non-200 HTTP status, classified through the real status mapping.
    Status(u16),
}

/// An in-memory [`ContentsClient`] serving canned responses.
///
/// Paths not inserted behave as a remote 404. Every `fetch` increments a
/// counter so tests can assert that an operation performed zero (or exactly
/// N) network calls.
#[derive(Debug, Default)]
pub struct MemoryContentsClient {
    responses: HashMap<String, Canned>,
    fetches: AtomicUsize,
}

impl MemoryContentsClient {
    /// Create an empty stub; every path reports 404 until inserted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a raw JSON body for the given normalized path.
    pub fn insert_body(&mut self, repo_path: impl Into<String>, body: impl Into<Bytes>) {
        self.responses
            .insert(repo_path.into(), Canned::Body(body.into()));
    }

    /// Serve a well-formed single-file response with the given content.
    pub fn insert_file(&mut self, repo_path: impl Into<String>, content: &[u8]) {
        let repo_path = repo_path.into();
        let name = repo_path.rsplit('/').next().unwrap_or("").to_string();
        let body = serde_json::json!({
            "name": name,
            "path": repo_path,
            "type": "file",
            "size": content.len(),
            "content": STANDARD.encode(content),
            "encoding": "base64",
        })
        .to_string();
        self.responses
            .insert(repo_path, Canned::Body(Bytes::from(body)));
    }

    /// Report a non-200 HTTP status for the given normalized path.
    pub fn insert_status(&mut self, repo_path: impl Into<String>, status: u16) {
        self.responses
            .insert(repo_path.into(), Canned::Status(status));
    }

    /// Number of `fetch` calls issued so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentsClient for MemoryContentsClient {
    async fn fetch(&self, repo_path: &str) -> Result<Bytes> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(repo_path) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(classify_status(*status, false, repo_path)),
            None => Err(FsError::NotFound(repo_path.to_string())),
        }
    }
}
