//! API Handlers
//!
//! HTTP request handlers for the cached static file server.

use std::io::ErrorKind;
use std::path::{Component, Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::mime::content_type_for;
use crate::models::{HealthResponse, StatsResponse};

/// Response header reporting whether content came from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// Application state shared across all handlers.
///
/// The cache sits behind a single mutex: its index and recency list are
/// updated together, and even lookups reorder the list.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache store
    pub cache: Arc<Mutex<CacheStore>>,
    /// Document root files are read from
    pub root: Arc<PathBuf>,
}

impl AppState {
    /// Creates a new AppState with the given cache store and document root.
    pub fn new(cache: CacheStore, root: impl Into<PathBuf>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
            root: Arc::new(root.into()),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::create(config.max_entries, config.index_size_hint)?;
        Ok(Self::new(cache, config.serve_dir.clone()))
    }
}

/// Normalises a request path into a cache key relative to the document root.
///
/// Rejects empty paths and anything that could leave the root.
pub fn cache_key_for(raw: &str) -> Result<String> {
    let mut segments = Vec::new();

    for component in FsPath::new(raw).components() {
        match component {
            Component::Normal(segment) => match segment.to_str() {
                Some(segment) => segments.push(segment),
                None => return Err(CacheError::InvalidPath(raw.to_string())),
            },
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(CacheError::InvalidPath(raw.to_string()));
            }
        }
    }

    if segments.is_empty() {
        return Err(CacheError::InvalidPath(raw.to_string()));
    }

    Ok(segments.join("/"))
}

fn file_response(content_type: String, content: Vec<u8>, cache_status: &'static str) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        [(CACHE_STATUS_HEADER, cache_status)],
        content,
    )
        .into_response()
}

/// Handler for GET /files/*path
///
/// Serves a file from the document root, answering from the cache when the
/// file has been served before and filling the cache otherwise.
pub async fn file_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response> {
    let key = cache_key_for(&path)?;

    {
        let mut cache = state.cache.lock().await;
        if let Some(view) = cache.get(&key) {
            debug!(key = %key, bytes = view.content_length(), "cache hit");
            let content_type = view.content_type().to_string();
            let content = view.content().to_vec();
            return Ok(file_response(content_type, content, "HIT"));
        }
    }

    // Read outside the lock; a concurrent miss on the same key just replaces
    let content = match tokio::fs::read(state.root.join(&key)).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(CacheError::NotFound(key));
        }
        Err(e) => {
            warn!(key = %key, error = %e, "failed to read file");
            return Err(CacheError::Io(e));
        }
    };

    let content_type = content_type_for(&key);
    debug!(key = %key, bytes = content.len(), content_type, "cache miss");

    state
        .cache
        .lock()
        .await
        .put(key, content_type, content.clone())?;

    Ok(file_response(content_type.to_string(), content, "MISS"))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.lock().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
