//! Cache Entry Module
//!
//! Defines the stored entry and the read-only view handed out on lookup.

// == Cache Entry ==
/// A single cached item.
///
/// Entries are immutable once built: refreshing a key replaces the whole
/// entry. `prev` and `next` are slot indices into the owning store's arena
/// and only describe the entry's position in the recency list.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Lookup key, unique within a cache
    pub(crate) key: String,
    /// Media type of the payload
    pub(crate) content_type: String,
    /// Opaque payload bytes
    pub(crate) content: Vec<u8>,
    /// Slot of the next more recently used entry
    pub(crate) prev: Option<usize>,
    /// Slot of the next less recently used entry
    pub(crate) next: Option<usize>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an unlinked entry that takes ownership of its payload.
    pub fn new(key: String, content_type: String, content: Vec<u8>) -> Self {
        Self {
            key,
            content_type,
            content,
            prev: None,
            next: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Size of the payload in bytes.
    pub fn content_length(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the entry is not threaded into any list.
    pub(crate) fn is_unlinked(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

// == Entry View ==
/// Read-only view of an entry returned by [`CacheStore::get`].
///
/// The view borrows the store, so it cannot be held across a later `put`
/// that might evict the entry it points at.
///
/// [`CacheStore::get`]: crate::cache::CacheStore::get
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    entry: &'a CacheEntry,
}

impl<'a> EntryView<'a> {
    pub(crate) fn new(entry: &'a CacheEntry) -> Self {
        Self { entry }
    }

    pub fn key(&self) -> &'a str {
        &self.entry.key
    }

    pub fn content_type(&self) -> &'a str {
        &self.entry.content_type
    }

    pub fn content(&self) -> &'a [u8] {
        &self.entry.content
    }

    pub fn content_length(&self) -> usize {
        self.entry.content.len()
    }
}
