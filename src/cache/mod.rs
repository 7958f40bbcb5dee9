//! Cache Module
//!
//! Fixed-capacity in-memory content cache with strict LRU eviction.

mod entry;
mod index;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{CacheEntry, EntryView};
pub use index::{KeyIndex, DEFAULT_INDEX_SIZE};
pub(crate) use lru::RecencyList;
pub use stats::CacheStats;
pub use store::CacheStore;
