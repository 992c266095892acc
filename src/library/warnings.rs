//! Non-fatal data problems found while building.
//!
//! Warnings are collected, never thrown: a miscategorized entry should not
//! block a build, but authors need to hear about it.

use serde::Serialize;

/// A data problem that did not stop the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    /// A tool's category label is not in the lookup table
    UnmappedToolCategory {
        resource_id: String,
        category: String,
        fallback: String,
    },

    /// A resource points at a category id that does not exist
    UnknownCategory {
        resource_id: String,
        category_id: String,
    },

    /// Two resources share an id
    DuplicateId { id: String },

    /// Two resources share a slug
    DuplicateSlug { slug: String },

    /// A category's authored resourceCount disagrees with the resource set
    ResourceCountDrift {
        category_id: String,
        declared: usize,
        actual: usize,
    },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildWarning::UnmappedToolCategory {
                resource_id,
                category,
                fallback,
            } => write!(
                f,
                "{}: unknown tool category \"{}\", using {}",
                resource_id, category, fallback
            ),
            BuildWarning::UnknownCategory {
                resource_id,
                category_id,
            } => write!(
                f,
                "{}: category id \"{}\" does not exist",
                resource_id, category_id
            ),
            BuildWarning::DuplicateId { id } => write!(f, "duplicate resource id: {}", id),
            BuildWarning::DuplicateSlug { slug } => write!(f, "duplicate resource slug: {}", slug),
            BuildWarning::ResourceCountDrift {
                category_id,
                declared,
                actual,
            } => write!(
                f,
                "{}: resourceCount is {} but {} resources reference it",
                category_id, declared, actual
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_display() {
        let warning = BuildWarning::UnmappedToolCategory {
            resource_id: "tool-x".to_string(),
            category: "Unknown Category".to_string(),
            fallback: "tools-cli".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "tool-x: unknown tool category \"Unknown Category\", using tools-cli"
        );
    }

    #[test]
    fn test_warning_serializes_with_kind() {
        let warning = BuildWarning::DuplicateSlug {
            slug: "repomix".to_string(),
        };
        let json = serde_json::to_value(&warning).unwrap();
        assert_eq!(json["kind"], "duplicate_slug");
        assert_eq!(json["slug"], "repomix");
    }
}
