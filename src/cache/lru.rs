//! Recency List Module
//!
//! Intrusive doubly linked list ordering live entries by last use.

use crate::cache::CacheEntry;

/// Arena slot storage the list is threaded through.
pub(crate) type Slots = [Option<CacheEntry>];

fn node(slots: &mut Slots, slot: usize) -> &mut CacheEntry {
    slots[slot]
        .as_mut()
        .expect("recency list references a vacant slot")
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// Links live inside the entries (`prev` / `next`), the list itself only
/// keeps the endpoints:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// The list never owns entries; every operation borrows the arena that does.
#[derive(Debug, Default)]
pub struct RecencyList {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert Head ==
    /// Links an unlinked entry in as the most recently used.
    pub(crate) fn insert_head(&mut self, slots: &mut Slots, slot: usize) {
        debug_assert!(self.head != Some(slot) && node(slots, slot).is_unlinked());

        match self.head {
            None => {
                let entry = node(slots, slot);
                entry.prev = None;
                entry.next = None;
                self.head = Some(slot);
                self.tail = Some(slot);
            }
            Some(old_head) => {
                node(slots, old_head).prev = Some(slot);
                let entry = node(slots, slot);
                entry.next = Some(old_head);
                entry.prev = None;
                self.head = Some(slot);
            }
        }

        self.len += 1;
    }

    // == Move To Head ==
    /// Promotes a linked entry to most recently used.
    ///
    /// No-op if the entry is already the head. Length is unchanged.
    pub(crate) fn move_to_head(&mut self, slots: &mut Slots, slot: usize) {
        if self.head == Some(slot) {
            return;
        }

        let (prev, next) = {
            let entry = node(slots, slot);
            (entry.prev, entry.next)
        };

        if self.tail == Some(slot) {
            // Tail: its predecessor becomes the new tail
            self.tail = prev;
            if let Some(prev) = prev {
                node(slots, prev).next = None;
            }
        } else {
            // Interior: join the neighbours
            if let Some(prev) = prev {
                node(slots, prev).next = next;
            }
            if let Some(next) = next {
                node(slots, next).prev = prev;
            }
        }

        if let Some(old_head) = self.head {
            node(slots, old_head).prev = Some(slot);
        }
        let entry = node(slots, slot);
        entry.next = self.head;
        entry.prev = None;
        self.head = Some(slot);
    }

    // == Remove Tail ==
    /// Unlinks and returns the least recently used slot.
    ///
    /// The entry stays in the arena; freeing it is the caller's job.
    /// Returns None if the list is empty.
    pub(crate) fn remove_tail(&mut self, slots: &mut Slots) -> Option<usize> {
        let old_tail = self.tail?;
        let prev = node(slots, old_tail).prev.take();

        self.tail = prev;
        match prev {
            Some(prev) => node(slots, prev).next = None,
            None => self.head = None,
        }

        self.len -= 1;
        Some(old_tail)
    }

    // == Unlink ==
    /// Removes an arbitrary linked entry from the list.
    pub(crate) fn unlink(&mut self, slots: &mut Slots, slot: usize) {
        let (prev, next) = {
            let entry = node(slots, slot);
            (entry.prev.take(), entry.next.take())
        };

        match prev {
            Some(prev) => node(slots, prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => node(slots, next).prev = prev,
            None => self.tail = prev,
        }

        self.len -= 1;
    }

    pub fn head(&self) -> Option<usize> {
        self.head
    }

    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Walks slots from most to least recently used.
    pub(crate) fn iter<'a>(&self, slots: &'a Slots) -> Iter<'a> {
        Iter {
            slots,
            cursor: self.head,
        }
    }
}

/// Head to tail iterator over `(slot, entry)` pairs.
pub(crate) struct Iter<'a> {
    slots: &'a Slots,
    cursor: Option<usize>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a CacheEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        let entry = self.slots[slot].as_ref()?;
        self.cursor = entry.next;
        Some((slot, entry))
    }
}
