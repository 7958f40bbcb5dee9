//! Error types for the cache and the file server built on it
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache and the server.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing storage could not be obtained
    #[error("Allocation failed: {0}")]
    Allocation(String),

    /// Capacity below the minimum of one entry
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// Key rejected by `put`
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Requested file does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request path is malformed or escapes the document root
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Reading the underlying resource failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidPath(_) | CacheError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            CacheError::Allocation(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::InvalidCapacity(_) | CacheError::Io(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache and the server.
pub type Result<T> = std::result::Result<T, CacheError>;
