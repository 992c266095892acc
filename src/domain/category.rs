//! Categories partition the catalog for navigation.

use serde::{Deserialize, Serialize};

/// A named grouping of resources.
///
/// `resource_count` as authored is a display hint only; the builder
/// recomputes it from the resource set (see `Catalog::categories_with_counts`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier, referenced by `Resource::category_id`
    pub id: String,

    /// Display name
    pub name: String,

    /// Routing key, unique across categories
    pub slug: String,

    /// Short description shown on the category page
    pub description: String,

    /// Icon name understood by the front end
    pub icon: String,

    /// Accent color (hex)
    pub color: String,

    /// Sort position in navigation
    pub order: u32,

    /// Number of resources in this category
    #[serde(default)]
    pub resource_count: usize,
}

impl Category {
    /// Copy of this category with `resource_count` replaced
    pub fn with_count(&self, resource_count: usize) -> Self {
        Self {
            resource_count,
            ..self.clone()
        }
    }
}
