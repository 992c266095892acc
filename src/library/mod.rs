//! The normalized resource library.
//!
//! ```text
//! Sources (configs, prompts, tools)
//!     └── normalize ──> Vec<Resource> + warnings
//!                           └── Catalog (queries)
//! ```

pub mod catalog;
pub mod normalize;
pub mod warnings;

pub use catalog::{trending_score, Catalog, SearchFilters, SearchResults};
pub use normalize::{
    normalize, tool_category_id, Normalized, StatsMode, StatsProfile, StatsSampler,
    FALLBACK_TOOL_CATEGORY_ID,
};
pub use warnings::BuildWarning;
