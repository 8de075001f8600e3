//! Memoization tables for resolved styles.

use std::hash::Hash;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::style::TextStyle;

/// A process-lifetime table from operation arguments to the resolved style.
///
/// Lookups take a shared lock. On a miss the result is computed with no
/// lock held and inserted only if the key is still vacant, so concurrent
/// callers may compute the same result twice but all of them receive the
/// instance that was stored first. Entries are never evicted.
pub(crate) struct ResolutionCache<K> {
    name: &'static str,
    entries: RwLock<FxHashMap<K, TextStyle>>,
}

impl<K: Eq + Hash> ResolutionCache<K> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Returns the stored result for `key`, computing and storing it on a miss.
    pub(crate) fn get_or_compute<F>(&self, key: K, compute: F) -> TextStyle
    where
        F: FnOnce(&K) -> TextStyle,
    {
        let cached = self.entries.read().get(&key).cloned();
        if let Some(style) = cached {
            return style;
        }

        log::trace!("{} cache miss", self.name);
        let computed = compute(&key);
        self.entries.write().entry(key).or_insert(computed).clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.read().len()
    }
}

/// Number of entries held by each table of a [`Resolver`].
///
/// [`Resolver`]: crate::Resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub mutate: usize,
    pub inherited: usize,
    pub global: usize,
    pub overridden: usize,
}

impl CacheStats {
    /// Total entries across all tables.
    pub fn total(&self) -> usize {
        self.mutate + self.inherited + self.global + self.overridden
    }
}
