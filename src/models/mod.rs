//! Response models for the file server API
//!
//! Defines the JSON bodies returned by the non-file endpoints.

pub mod responses;

// Re-export commonly used types
pub use responses::{HealthResponse, StatsResponse};
