//! LRU Content Cache - fixed-capacity in-memory cache with strict LRU eviction
//!
//! Ships with a small static file server that uses the cache to avoid
//! re-reading files from disk.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod mime;
pub mod models;

pub use api::AppState;
pub use cache::CacheStore;
pub use config::Config;
pub use error::CacheError;
