//! Aggregates and reduced projections served by the API.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Difficulty, Resource, ResourceType};
use crate::library::Catalog;

/// Aggregate counts for `v1/stats.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_resources: usize,
    pub total_categories: usize,
    pub total_tags: usize,
    pub featured_count: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_difficulty: BTreeMap<String, usize>,
    pub by_category: BTreeMap<String, usize>,
}

impl CatalogStats {
    /// Every known type, difficulty and category appears, with zero when empty
    pub fn compute(catalog: &Catalog) -> Self {
        let mut by_type: BTreeMap<String, usize> = ResourceType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), 0))
            .collect();
        let mut by_difficulty: BTreeMap<String, usize> = [
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ]
        .iter()
        .map(|d| (d.as_str().to_string(), 0))
        .collect();
        let mut by_category: BTreeMap<String, usize> = catalog
            .categories
            .iter()
            .map(|c| (c.id.clone(), 0))
            .collect();

        for resource in &catalog.resources {
            *by_type
                .entry(resource.resource_type.as_str().to_string())
                .or_default() += 1;
            *by_difficulty
                .entry(resource.difficulty.as_str().to_string())
                .or_default() += 1;
            *by_category.entry(resource.category_id.clone()).or_default() += 1;
        }

        Self {
            total_resources: catalog.len(),
            total_categories: catalog.categories.len(),
            total_tags: catalog.all_tags().len(),
            featured_count: catalog.resources.iter().filter(|r| r.featured).count(),
            by_type,
            by_difficulty,
            by_category,
        }
    }
}

/// Per-resource projection for the client-side search index.
/// Drops body text, links and stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub slug: &'a str,
    pub tagline: &'a str,
    pub description: &'a str,
    pub category_id: &'a str,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub tags: &'a [String],
    pub author: &'a str,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<&'a str>,
    pub featured: bool,
    pub last_updated: NaiveDate,
}

impl<'a> From<&'a Resource> for SearchEntry<'a> {
    fn from(r: &'a Resource) -> Self {
        Self {
            id: &r.id,
            title: &r.title,
            slug: &r.slug,
            tagline: &r.tagline,
            description: &r.description,
            category_id: &r.category_id,
            resource_type: r.resource_type,
            tags: &r.tags,
            author: &r.author.name,
            difficulty: r.difficulty,
            language: r.language.as_deref(),
            framework: r.framework.as_deref(),
            featured: r.featured,
            last_updated: r.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Sources;
    use crate::library::StatsMode;

    #[test]
    fn test_stats_breakdowns_sum_to_total() {
        let catalog = Catalog::from_sources(&Sources::embedded().unwrap(), StatsMode::default());
        let stats = CatalogStats::compute(&catalog);

        assert_eq!(stats.total_resources, catalog.len());
        assert_eq!(stats.by_type.values().sum::<usize>(), stats.total_resources);
        assert_eq!(
            stats.by_difficulty.values().sum::<usize>(),
            stats.total_resources
        );
        assert_eq!(
            stats.by_category.values().sum::<usize>(),
            stats.total_resources
        );
        assert_eq!(stats.by_type["CODE_SNIPPET"], 0);
        assert_eq!(
            stats.featured_count,
            catalog.resources.iter().filter(|r| r.featured).count()
        );
    }

    #[test]
    fn test_search_entry_drops_content() {
        let catalog = Catalog::from_sources(&Sources::embedded().unwrap(), StatsMode::default());
        let config = catalog.by_type(ResourceType::Configuration)[0];

        let json = serde_json::to_value(SearchEntry::from(config)).unwrap();
        assert!(json.get("content").is_none());
        assert!(json.get("stats").is_none());
        assert_eq!(json["id"], config.id.as_str());
        assert_eq!(json["author"], config.author.name.as_str());
        assert_eq!(json["type"], "CONFIGURATION");
    }
}
