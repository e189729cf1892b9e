//! In-process caching of remote template content

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::error::Result;

/// Cache key combining repository, ref and normalized file path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub repo_slug: String,
    pub r#ref: String,
    pub path: String,
}

impl CacheKey {
    pub fn new(repo_slug: &str, r#ref: &str, path: &str) -> Self {
        Self {
            repo_slug: repo_slug.to_string(),
            r#ref: r#ref.to_string(),
            path: path.to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}", self.repo_slug, self.r#ref, self.path)
    }
}

/// Remote file contents fetched during a single run.
///
/// Entries are only ever inserted; nothing is evicted or persisted.
#[derive(Debug, Default)]
pub struct RemoteCache {
    entries: HashMap<CacheKey, String>,
}

impl RemoteCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached body, or fetch and cache it if not present.
    ///
    /// A failed fetch leaves the cache untouched.
    pub fn get_or_fetch<F>(&mut self, key: CacheKey, fetch: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(cached) = self.entries.get(&key) {
            debug!("remote cache hit: {}", key);
            return Ok(cached.clone());
        }

        let body = fetch()?;
        self.entries.insert(key, body.clone());
        Ok(body)
    }

    /// Get a value from cache without fetching
    pub fn get(&self, key: &CacheKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
