//! Key Index Module
//!
//! Maps cache keys to the arena slot holding their entry.

use std::collections::HashMap;

use crate::error::{CacheError, Result};

/// Index capacity used when the caller passes a size hint of zero.
pub const DEFAULT_INDEX_SIZE: usize = 128;

// == Key Index ==
/// Key to slot lookup table.
///
/// The index only stores slot numbers. It never owns or frees the entries
/// those slots refer to.
#[derive(Debug, Default)]
pub struct KeyIndex {
    slots: HashMap<String, usize>,
}

impl KeyIndex {
    // == Constructor ==
    /// Creates an empty index sized for `size_hint` keys.
    ///
    /// A hint of zero selects [`DEFAULT_INDEX_SIZE`]. Fails with
    /// [`CacheError::Allocation`] if the table cannot be reserved.
    pub fn with_size_hint(size_hint: usize) -> Result<Self> {
        let capacity = if size_hint == 0 {
            DEFAULT_INDEX_SIZE
        } else {
            size_hint
        };

        let mut slots = HashMap::new();
        slots.try_reserve(capacity).map_err(|e| {
            CacheError::Allocation(format!("key index of {} slots: {}", capacity, e))
        })?;

        Ok(Self { slots })
    }

    // == Put ==
    /// Maps `key` to `slot`, returning the slot previously stored there.
    pub fn put(&mut self, key: &str, slot: usize) -> Option<usize> {
        self.slots.insert(key.to_string(), slot)
    }

    /// Makes room for one more key without reallocating inside `put`.
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        self.slots
            .try_reserve(1)
            .map_err(|e| CacheError::Allocation(format!("key index growth: {}", e)))
    }

    // == Get ==
    pub fn get(&self, key: &str) -> Option<usize> {
        self.slots.get(key).copied()
    }

    // == Delete ==
    /// Removes `key`, returning its slot. Absent keys are a no-op.
    pub fn delete(&mut self, key: &str) -> Option<usize> {
        self.slots.remove(key)
    }

    // == Destroy ==
    /// Releases the index storage. Entries referenced by it are untouched.
    pub fn destroy(self) {
        drop(self.slots);
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over all indexed keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}
