/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Hover-driven prefetch cache.
//!
//! Keyed by normalized origin-relative path (query and fragment stripped).
//! Entries are immutable once inserted and never evicted within a session;
//! the cache is bounded by page lifetime, not by capacity. In-flight paths
//! are tracked so repeated hover-intent over the same link starts at most
//! one underlying fetch.

use std::collections::HashSet;
use std::sync::Arc;

use moka::sync::Cache;
use url::Url;

#[derive(Debug, Clone)]
pub struct CachedPage {
    pub markup: String,
    pub fetched_at_ms: u64,
}

pub struct PrefetchCache {
    entries: Cache<String, Arc<CachedPage>>,
    in_flight: HashSet<String>,
}

/// Cache key for a destination: origin-relative path, no query, no hash.
pub fn normalized_path(url: &Url) -> String {
    url.path().to_string()
}

impl PrefetchCache {
    pub fn new() -> Self {
        Self {
            // No max_capacity: entries live for the page session.
            entries: Cache::builder().build(),
            in_flight: HashSet::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<Arc<CachedPage>> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_in_flight(&self, path: &str) -> bool {
        self.in_flight.contains(path)
    }

    /// Record that a speculative fetch for `path` has started. Returns false
    /// when the path is already cached or already being fetched, in which
    /// case the caller must not start another fetch.
    pub fn mark_in_flight(&mut self, path: &str) -> bool {
        if self.contains(path) || self.in_flight.contains(path) {
            return false;
        }
        self.in_flight.insert(path.to_string());
        true
    }

    /// Insert fetched markup. Idempotent: the first insert for a path wins
    /// and later ones are ignored, matching the no-refetch guarantee.
    pub fn insert(&mut self, path: &str, markup: String, now_ms: u64) {
        self.in_flight.remove(path);
        if self.entries.contains_key(path) {
            return;
        }
        self.entries.insert(
            path.to_string(),
            Arc::new(CachedPage {
                markup,
                fetched_at_ms: now_ms,
            }),
        );
    }

    /// Forget an in-flight marker after a failed speculative fetch so a
    /// later hover may retry.
    pub fn abandon_in_flight(&mut self, path: &str) {
        self.in_flight.remove(path);
    }
}

impl Default for PrefetchCache {
    fn default() -> Self {
        Self::new()
    }
}
