//! catalog-api - static JSON API for a curated resource catalog
//!
//! The catalog holds CLAUDE.md configurations, prompt templates and tool
//! listings. A build normalizes the three record families into one
//! `Resource` shape and writes a fixed tree of JSON files for a website.
//!
//! # Architecture
//!
//! - Every build is a full regeneration from the source catalogs
//! - Placeholder stats come from a seeded PRNG, so builds are reproducible
//!   unless random mode is requested
//! - Data problems (unmapped categories, count drift) are collected as
//!   warnings and never abort a build; filesystem errors always do
//!
//! # Modules
//!
//! - `content`: Hand-authored catalogs (embedded YAML)
//! - `domain`: Data structures (Category, Resource, source records)
//! - `library`: Normalizer and catalog queries
//! - `core`: API builder (envelopes, stats, manifest)
//! - `config`: Configuration discovery
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Build into ./api
//! catalog-api
//!
//! # Build elsewhere with a different seed
//! catalog-api public/api --seed 7
//!
//! # Query the catalog
//! catalog-api search react --type configuration
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod core;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use crate::core::{ApiBuilder, BuildError, BuildOptions, BuildReport};
pub use content::Sources;
pub use domain::{Category, Resource, ResourceType, SourceRecord};
pub use library::{BuildWarning, Catalog, SearchFilters, StatsMode};
