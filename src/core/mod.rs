//! API build logic.
//!
//! This module contains:
//! - ApiBuilder: writes the JSON tree and manifest
//! - Envelope: the `{payload, meta}` wrapper
//! - Stats: aggregates and the search-index projection
//! - BuildError: fatal build failures

pub mod api;
pub mod envelope;
pub mod error;
pub mod stats;

// Re-export commonly used types
pub use api::{
    endpoint_path, ApiBuilder, BuildOptions, BuildReport, WrittenFile, ENDPOINTS, FEATURED_LIMIT,
    MANIFEST_PATH, POPULAR_LIMIT, TRENDING_LIMIT,
};
pub use envelope::{Envelope, Meta};
pub use error::BuildError;
pub use stats::{CatalogStats, SearchEntry};
