//! Cache Store Module
//!
//! The cache engine: an arena of entries, the recency list threaded through
//! it and the key index, kept in lockstep on every mutation.

use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, EntryView, KeyIndex, RecencyList};
use crate::error::{CacheError, Result};

/// Upper bound on arena slots reserved up front; larger caches grow on demand.
const PREALLOCATED_SLOTS: usize = 1024;

// == Cache Store ==
/// Fixed-capacity LRU cache of opaque content keyed by string.
///
/// Entries live in `slots`; vacated slots are recycled through `free`. The
/// recency list and the index both refer to entries by slot number, and only
/// this type mutates either of them.
#[derive(Debug)]
pub struct CacheStore {
    /// Entry arena
    slots: Vec<Option<CacheEntry>>,
    /// Vacant slots ready for reuse
    free: Vec<usize>,
    /// Key to slot lookup
    index: KeyIndex,
    /// Most to least recently used ordering
    lru: RecencyList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of live entries
    max_size: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty cache holding at most `max_size` entries.
    ///
    /// # Arguments
    /// * `max_size` - Capacity ceiling, must be at least 1
    /// * `index_size_hint` - Initial key index capacity, 0 for the default
    ///
    /// # Errors
    /// * [`CacheError::InvalidCapacity`] if `max_size` is zero
    /// * [`CacheError::Allocation`] if backing storage cannot be reserved
    pub fn create(max_size: usize, index_size_hint: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(CacheError::InvalidCapacity(max_size));
        }

        let index = KeyIndex::with_size_hint(index_size_hint)?;

        let mut slots = Vec::new();
        slots
            .try_reserve(max_size.saturating_add(1).min(PREALLOCATED_SLOTS))
            .map_err(|e| CacheError::Allocation(format!("entry arena: {}", e)))?;

        Ok(Self {
            slots,
            free: Vec::new(),
            index,
            lru: RecencyList::new(),
            stats: CacheStats::new(max_size),
            max_size,
        })
    }

    // == Put ==
    /// Stores `content` under `key`, making it the most recently used entry.
    ///
    /// A key that is already cached is replaced: the old entry is unlinked
    /// and dropped before the new one goes in. Once the new entry is linked,
    /// least recently used entries are evicted until the cache is back within
    /// capacity.
    ///
    /// # Errors
    /// * [`CacheError::InvalidKey`] if `key` is empty
    /// * [`CacheError::Allocation`] if storage for the entry cannot be
    ///   obtained; the cache is left unchanged
    pub fn put(
        &mut self,
        key: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Result<()> {
        let key = key.into();
        if key.is_empty() {
            return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
        }

        // Reserve everything up front so a failure cannot leave a half-linked entry
        if self.free.is_empty() {
            self.slots
                .try_reserve(1)
                .map_err(|e| CacheError::Allocation(format!("entry for {}: {}", key, e)))?;
            self.free
                .try_reserve(1)
                .map_err(|e| CacheError::Allocation(format!("entry for {}: {}", key, e)))?;
        }
        self.index.reserve_one()?;

        if let Some(old) = self.index.delete(&key) {
            self.lru.unlink(&mut self.slots, old);
            self.release(old);
            trace!(key = %key, "replaced cached entry");
        }

        let slot = self.allocate(CacheEntry::new(key, content_type.into(), content.into()));
        self.lru.insert_head(&mut self.slots, slot);
        if let Some(entry) = &self.slots[slot] {
            self.index.put(&entry.key, slot);
        }

        while self.lru.len() > self.max_size {
            if !self.evict_lru() {
                break;
            }
        }

        self.stats.set_total_entries(self.lru.len());
        Ok(())
    }

    // == Get ==
    /// Looks up `key`, promoting it to most recently used on a hit.
    ///
    /// A miss returns None and leaves size and ordering untouched.
    pub fn get(&mut self, key: &str) -> Option<EntryView<'_>> {
        match self.index.get(key) {
            Some(slot) => {
                self.stats.record_hit();
                self.lru.move_to_head(&mut self.slots, slot);
                self.slots[slot].as_ref().map(EntryView::new)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Peek ==
    /// Looks up `key` without touching recency or statistics.
    pub fn peek(&self, key: &str) -> Option<EntryView<'_>> {
        let slot = self.index.get(key)?;
        self.slots[slot].as_ref().map(EntryView::new)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.get(key).is_some()
    }

    // == Destroy ==
    /// Tears the cache down, releasing every entry, the index and the arena.
    ///
    /// Returns the number of entries released.
    pub fn destroy(self) -> usize {
        let CacheStore {
            mut slots,
            index,
            lru,
            ..
        } = self;

        let mut released = 0;
        let mut cursor = lru.head();
        while let Some(slot) = cursor {
            cursor = slots[slot].take().and_then(|entry| entry.next);
            released += 1;
        }

        index.destroy();
        drop(slots);

        trace!(released, "cache destroyed");
        released
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.lru.len());
        stats
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> impl Iterator<Item = &str> {
        self.lru.iter(&self.slots).map(|(_, entry)| entry.key())
    }

    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_size
    }

    // == Internals ==
    fn allocate(&mut self, entry: CacheEntry) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, slot: usize) -> Option<CacheEntry> {
        let entry = self.slots[slot].take();
        self.free.push(slot);
        entry
    }

    /// Drops the least recently used entry. Returns false if the cache is empty.
    fn evict_lru(&mut self) -> bool {
        let Some(slot) = self.lru.remove_tail(&mut self.slots) else {
            return false;
        };

        if let Some(entry) = self.release(slot) {
            self.index.delete(&entry.key);
            self.stats.record_eviction();
            trace!(key = %entry.key, bytes = entry.content_length(), "evicted entry");
        }
        true
    }

    /// Panics if the index and the recency list disagree.
    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        let mut prev = None;
        for (slot, entry) in self.lru.iter(&self.slots) {
            assert_eq!(entry.prev, prev, "broken back link at {}", entry.key);
            assert!(seen.insert(entry.key.clone()), "duplicate key {}", entry.key);
            assert_eq!(self.index.get(&entry.key), Some(slot), "index skew at {}", entry.key);
            prev = Some(slot);
        }

        assert_eq!(self.lru.tail(), prev);
        assert_eq!(seen.len(), self.lru.len());
        assert_eq!(self.index.len(), self.lru.len());
        assert!(self.lru.len() <= self.max_size);

        let occupied = self.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(occupied, self.lru.len(), "arena holds unlinked entries");
        assert_eq!(occupied + self.free.len(), self.slots.len());
    }
}
