//! Short-lived read-through cache of decoded entries.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::Mutex;

use crate::source::entry::Entry;

/// An LRU cache of decoded entries keyed by normalized repository path.
///
/// Read-through only: a miss always triggers a real fetch, and nothing is
/// ever synthesized. Bounded by entry count; discarded with the adapter
/// instance, so cached results never outlive the process or leak across
/// adapters.
pub struct EntryCache {
    entries: Mutex<LruCache<String, Arc<Entry>>>,
}

impl EntryCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up a previously decoded entry.
    pub async fn get(&self, repo_path: &str) -> Option<Arc<Entry>> {
        self.entries.lock().await.get(repo_path).cloned()
    }

    /// Store a decoded entry, evicting the least recently used on overflow.
    pub async fn put(&self, repo_path: &str, entry: Arc<Entry>) {
        self.entries.lock().await.put(repo_path.to_string(), entry);
    }
}
