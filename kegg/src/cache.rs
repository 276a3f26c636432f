//! Response caching keyed by request URL.
//!
//! The client never evicts or expires anything: it reads through the cache
//! before a request and writes through it after a successful one. Lifetime
//! and persistence of the cache belong to the caller.

use crate::transport::Transport;
use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Storage for raw response bodies, keyed by request URL.
pub trait Cache {
    /// The cached body for `url`, if any.
    fn get(&self, url: &str) -> Option<String>;

    /// Store the body fetched for `url`.
    fn set(&mut self, url: &str, body: String);
}

/// A cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _url: &str) -> Option<String> {
        None
    }

    fn set(&mut self, _url: &str, _body: String) {}
}

/// In-memory cache preserving insertion order, serializable for snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryCache {
    entries: IndexMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Cached URLs in the order they were stored.
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Cache for MemoryCache {
    fn get(&self, url: &str) -> Option<String> {
        self.entries.get(url).cloned()
    }

    fn set(&mut self, url: &str, body: String) {
        self.entries.insert(url.to_string(), body);
    }
}

impl FromIterator<(String, String)> for MemoryCache {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MemoryCache {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Cache for HashMap<String, String> {
    fn get(&self, url: &str) -> Option<String> {
        HashMap::get(self, url).cloned()
    }

    fn set(&mut self, url: &str, body: String) {
        self.insert(url.to_string(), body);
    }
}

impl<C: Cache + ?Sized> Cache for &mut C {
    fn get(&self, url: &str) -> Option<String> {
        (**self).get(url)
    }

    fn set(&mut self, url: &str, body: String) {
        (**self).set(url, body)
    }
}

impl<C: Cache + ?Sized> Cache for Box<C> {
    fn get(&self, url: &str) -> Option<String> {
        (**self).get(url)
    }

    fn set(&mut self, url: &str, body: String) {
        (**self).set(url, body)
    }
}

/// A cache shared between threads. Each thread clones the `Arc` and passes
/// its own handle to the client.
impl<C: Cache> Cache for Arc<Mutex<C>> {
    fn get(&self, url: &str) -> Option<String> {
        lock(self).get(url)
    }

    fn set(&mut self, url: &str, body: String) {
        lock(self).set(url, body)
    }
}

// Poisoning is ignored: entries are written whole.
fn lock<C>(shared: &Mutex<C>) -> MutexGuard<'_, C> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Return the body for `url`, fetching it through `transport` on a miss.
///
/// Only successful fetches are stored; a failed fetch leaves the cache as it
/// was.
pub fn fetch_with_cache<T, C>(transport: &T, cache: &mut C, url: &str) -> Result<String>
where
    T: Transport + ?Sized,
    C: Cache + ?Sized,
{
    if let Some(body) = cache.get(url) {
        tracing::debug!(url, "cache hit");
        return Ok(body);
    }

    tracing::debug!(url, "cache miss, fetching");
    let body = transport.fetch(url)?;
    cache.set(url, body.clone());
    Ok(body)
}
