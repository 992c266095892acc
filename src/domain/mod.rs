//! Domain types for the resource catalog.
//!
//! This module contains the core data structures:
//! - Category: navigation groupings
//! - Resource: the unified projection every endpoint serves
//! - Source records: the three hand-authored families (configs, prompts, tools)

pub mod category;
pub mod resource;
pub mod source;

// Re-export commonly used types
pub use category::Category;
pub use resource::{Author, Difficulty, Resource, ResourceStats, ResourceType};
pub use source::{
    ClaudeMdConfig, PromptExample, PromptTemplate, PromptVariable, SourceRecord, Tool, ToolKind,
};
