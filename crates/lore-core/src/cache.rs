//! Key-tag memoization cache.
//!
//! Entries are stored under a key and labelled with any number of tags.
//! Invalidating a tag drops every entry carrying it, so a content update to
//! one faction or entity only evicts the results that depended on it.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::hash::Hash;

struct CacheEntry<V> {
    value: V,
    tags: BTreeSet<String>,
}

/// Bounded cache with tag-based invalidation and FIFO eviction.
pub struct TaggedCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// Insertion order for eviction, kept in sync with `entries`.
    order: VecDeque<K>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl<K: Eq + Hash + Clone, V> TaggedCache<K, V> {
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|e| &e.value)
    }

    /// Insert or replace a value with the given tags.
    pub fn insert<I, S>(&mut self, key: K, tags: I, value: V)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags = tags.into_iter().map(Into::into).collect();
        if self.entries.insert(key.clone(), CacheEntry { value, tags }).is_none() {
            self.order.push_back(key);
        }
        self.evict_overflow();
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// A failed computation caches nothing.
    pub fn get_or_try_insert_with<I, S, E, F>(&mut self, key: K, tags: I, f: F) -> Result<&V, E>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce() -> Result<V, E>,
    {
        self.get_or_try_insert_tagged_with(key, || f().map(|value| (value, tags)))
    }

    /// Like [`Self::get_or_try_insert_with`], but the computation also returns
    /// the tags, for values whose dependencies are only known once computed.
    pub fn get_or_try_insert_tagged_with<I, S, E, F>(&mut self, key: K, f: F) -> Result<&V, E>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce() -> Result<(V, I), E>,
    {
        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            let (value, tags) = f()?;
            self.insert(key.clone(), tags, value);
        }
        // Capacity is at least 1 and the key was inserted last, so it survived eviction.
        Ok(&self
            .entries
            .get(&key)
            .expect("entry present after insert")
            .value)
    }

    /// Drop one entry. Returns true if it was present.
    pub fn invalidate(&mut self, key: &K) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.order.retain(|k| k != key);
        }
        removed
    }

    /// Drop every entry carrying `tag`. Returns the number removed.
    pub fn invalidate_tag(&mut self, tag: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| !e.tags.contains(tag));
        let entries = &self.entries;
        self.order.retain(|k| entries.contains_key(k));
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::debug!("invalidated {} cache entries tagged '{}'", removed, tag);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) counted by the `get_or_try_insert_*` methods.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    fn evict_overflow(&mut self) {
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[test]
    fn test_memoizes_on_hit() {
        let mut cache: TaggedCache<&str, usize> = TaggedCache::new(4);
        let mut calls = 0;
        for _ in 0..3 {
            let v = cache
                .get_or_try_insert_with("darius", ["noxus"], || {
                    calls += 1;
                    Ok::<_, Infallible>(42)
                })
                .unwrap();
            assert_eq!(*v, 42);
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.stats(), (2, 1));
    }

    #[test]
    fn test_failed_compute_is_not_cached() {
        let mut cache: TaggedCache<&str, usize> = TaggedCache::new(4);
        let result = cache.get_or_try_insert_with("x", Vec::<String>::new(), || Err("boom"));
        assert_eq!(result, Err("boom"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_tags_computed_with_value() {
        let mut cache: TaggedCache<&str, Vec<&str>> = TaggedCache::new(4);
        let members = cache
            .get_or_try_insert_tagged_with("darius", || {
                let members = vec!["Swain", "Katarina"];
                let tags: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                Ok::<_, Infallible>((members, tags))
            })
            .unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(cache.invalidate_tag("Katarina"), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalidate_tag_drops_tagged_entries_only() {
        let mut cache: TaggedCache<&str, u8> = TaggedCache::new(8);
        cache.insert("darius", ["noxus", "locale:en"], 1);
        cache.insert("draven", ["noxus", "locale:pl"], 2);
        cache.insert("irelia", ["ionia", "locale:en"], 3);

        assert_eq!(cache.invalidate_tag("noxus"), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"irelia"), Some(&3));
        assert_eq!(cache.invalidate_tag("noxus"), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache: TaggedCache<u32, u32> = TaggedCache::new(2);
        cache.insert(1, ["a"], 10);
        cache.insert(2, ["a"], 20);
        cache.insert(3, ["a"], 30);

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&1).is_none());
        assert_eq!(cache.get(&3), Some(&30));
    }

    #[test]
    fn test_replace_keeps_single_order_slot() {
        let mut cache: TaggedCache<u32, u32> = TaggedCache::new(2);
        cache.insert(1, ["a"], 10);
        cache.insert(1, ["b"], 11);
        cache.insert(2, ["a"], 20);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&1), Some(&11));
        assert_eq!(cache.invalidate_tag("a"), 1);
        assert!(cache.invalidate(&1));
        assert!(cache.is_empty());
    }
}
