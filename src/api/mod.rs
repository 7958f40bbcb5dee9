//! API Module
//!
//! HTTP handlers and routing for the cached static file server.
//!
//! # Endpoints
//! - `GET /files/*path` - Serve a file through the cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
