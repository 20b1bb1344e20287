use std::sync::{Mutex, MutexGuard};

use indexmap::IndexMap;
#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::config::{CacheConfig, DEFAULT_CACHE_CAPACITY, EvictionPolicy};
use crate::version::nuget::NuGetVersion;

/// Memoization table for parsed versions, keyed by trimmed input
#[cfg_attr(test, automock)]
pub trait ParseCache: Send + Sync {
    /// Look up a previously parsed version
    fn get(&self, input: &str) -> Option<NuGetVersion>;

    /// Store a parsed version unless the input is already present
    ///
    /// The presence check and the insert happen under a single lock.
    fn insert(&self, input: &str, version: &NuGetVersion);
}

/// Bounded in-memory parse cache guarded by one mutex
///
/// With [`EvictionPolicy::ClearOnOverflow`] the whole table is dropped when a
/// new entry would exceed the capacity. With [`EvictionPolicy::Lru`] only the
/// least recently used entry is dropped.
pub struct VersionCache {
    entries: Mutex<IndexMap<String, NuGetVersion>>,
    capacity: usize,
    eviction: EvictionPolicy,
}

impl VersionCache {
    /// A capacity of zero disables caching.
    pub fn new(capacity: usize, eviction: EvictionPolicy) -> Self {
        Self {
            entries: Mutex::new(IndexMap::with_capacity(capacity)),
            capacity,
            eviction,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.capacity, config.eviction)
    }

    /// Acquire the table lock, recovering from poisoning
    ///
    /// Entries are immutable values, so a panic in another holder cannot
    /// leave a half-written entry behind.
    fn lock_entries(&self) -> MutexGuard<'_, IndexMap<String, NuGetVersion>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Parse cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn eviction(&self) -> EvictionPolicy {
        self.eviction
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    pub fn clear(&self) {
        self.lock_entries().clear();
    }
}

impl Default for VersionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY, EvictionPolicy::default())
    }
}

impl ParseCache for VersionCache {
    fn get(&self, input: &str) -> Option<NuGetVersion> {
        let mut entries = self.lock_entries();
        let index = entries.get_index_of(input)?;

        let index = match self.eviction {
            EvictionPolicy::Lru => {
                let last = entries.len() - 1;
                entries.move_index(index, last);
                last
            }
            EvictionPolicy::ClearOnOverflow => index,
        };

        entries.get_index(index).map(|(_, version)| version.clone())
    }

    fn insert(&self, input: &str, version: &NuGetVersion) {
        if self.capacity == 0 {
            return;
        }

        let mut entries = self.lock_entries();
        if entries.contains_key(input) {
            return;
        }

        if entries.len() >= self.capacity {
            match self.eviction {
                EvictionPolicy::ClearOnOverflow => {
                    debug!(
                        "Parse cache reached {} entries, clearing",
                        entries.len()
                    );
                    entries.clear();
                }
                EvictionPolicy::Lru => {
                    if let Some((evicted, _)) = entries.shift_remove_index(0) {
                        debug!("Parse cache evicted least recently used '{}'", evicted);
                    }
                }
            }
        }

        entries.insert(input.to_string(), version.clone());
    }
}
