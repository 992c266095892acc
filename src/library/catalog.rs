//! Catalog of all normalized resources.
//!
//! Read-only queries over the unified resource set. Nothing here fails:
//! lookups return `None`, filters return empty vectors.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveTime, Utc};

use super::normalize::{normalize, Normalized, StatsMode};
use super::warnings::BuildWarning;
use crate::content::Sources;
use crate::domain::{Category, Difficulty, Resource, ResourceType, SourceRecord};

/// Days a resource counts as recently updated
pub const TRENDING_WINDOW_DAYS: i64 = 30;

/// Score bonus for recently updated resources
pub const RECENCY_BONUS: f64 = 20.0;

/// Catalog of categories and normalized resources
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Categories as authored
    pub categories: Vec<Category>,

    /// Normalized resources, configs then prompts then tools
    pub resources: Vec<Resource>,

    /// Full source records by resource id
    sources: HashMap<String, SourceRecord>,

    /// Warnings raised during normalization
    normalize_warnings: Vec<BuildWarning>,
}

/// Optional filters for [`Catalog::search`]. Set filters are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub resource_type: Option<ResourceType>,
    pub difficulty: Option<Difficulty>,
    pub language: Option<String>,
    pub framework: Option<String>,
    pub category: Option<String>,
    /// Matches when the resource has any of these tags
    pub tags: Vec<String>,
}

/// Search hits plus the categories they fall in
#[derive(Debug, Clone)]
pub struct SearchResults<'a> {
    pub resources: Vec<&'a Resource>,
    pub categories: Vec<&'a Category>,
}

impl Catalog {
    /// Normalize `sources` into a catalog
    pub fn from_sources(sources: &Sources, mode: StatsMode) -> Self {
        let Normalized {
            resources,
            warnings,
        } = normalize(&sources.configs, &sources.prompts, &sources.tools, mode);

        let sources_by_id = sources
            .configs
            .iter()
            .cloned()
            .map(SourceRecord::Config)
            .chain(sources.prompts.iter().cloned().map(SourceRecord::Prompt))
            .chain(sources.tools.iter().cloned().map(SourceRecord::Tool))
            .map(|record| (record.id().to_string(), record))
            .collect();

        Self {
            categories: sources.categories.clone(),
            resources,
            sources: sources_by_id,
            normalize_warnings: warnings,
        }
    }

    /// Build a catalog directly from resources (no source records)
    pub fn from_resources(categories: Vec<Category>, resources: Vec<Resource>) -> Self {
        Self {
            categories,
            resources,
            sources: HashMap::new(),
            normalize_warnings: Vec::new(),
        }
    }

    /// Get a resource by ID
    pub fn by_id(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Get a resource by slug
    pub fn by_slug(&self, slug: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.slug == slug)
    }

    /// The full source record behind a resource
    pub fn source(&self, id: &str) -> Option<&SourceRecord> {
        self.sources.get(id)
    }

    /// Get a category by ID
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn by_category(&self, category_id: &str) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.category_id == category_id)
            .collect()
    }

    pub fn by_type(&self, resource_type: ResourceType) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.resource_type == resource_type)
            .collect()
    }

    pub fn by_tag(&self, tag: &str) -> Vec<&Resource> {
        self.resources.iter().filter(|r| r.has_tag(tag)).collect()
    }

    pub fn by_author(&self, name: &str) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.author.name == name)
            .collect()
    }

    /// Featured resources, most votes first.
    ///
    /// Sorting is stable, so equal vote counts keep catalog order. The same
    /// holds for [`popular`](Self::popular) and [`trending`](Self::trending).
    pub fn featured(&self, limit: usize) -> Vec<&Resource> {
        let mut items: Vec<_> = self.resources.iter().filter(|r| r.featured).collect();
        items.sort_by(|a, b| b.stats.votes.cmp(&a.stats.votes));
        items.truncate(limit);
        items
    }

    /// Most copied resources first
    pub fn popular(&self, limit: usize) -> Vec<&Resource> {
        let mut items: Vec<_> = self.resources.iter().collect();
        items.sort_by(|a, b| b.stats.copies.cmp(&a.stats.copies));
        items.truncate(limit);
        items
    }

    /// Highest trending score first, evaluated against the current time
    pub fn trending(&self, limit: usize) -> Vec<&Resource> {
        self.trending_at(limit, Utc::now())
    }

    /// Highest trending score first, evaluated against `now`
    pub fn trending_at(&self, limit: usize, now: DateTime<Utc>) -> Vec<&Resource> {
        let mut scored: Vec<_> = self
            .resources
            .iter()
            .map(|r| (trending_score(r, now), r))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        scored.into_iter().take(limit).map(|(_, r)| r).collect()
    }

    /// Filter, then match `query` case-insensitively against title,
    /// description, tags and content. A blank query matches everything.
    pub fn search(&self, query: &str, filters: &SearchFilters) -> SearchResults<'_> {
        let needle = query.trim().to_lowercase();

        let resources: Vec<&Resource> = self
            .resources
            .iter()
            .filter(|r| filters.matches(r))
            .filter(|r| needle.is_empty() || r.matches_text(&needle))
            .collect();

        let touched: HashSet<&str> = resources.iter().map(|r| r.category_id.as_str()).collect();
        let categories = self
            .categories
            .iter()
            .filter(|c| touched.contains(c.id.as_str()))
            .collect();

        SearchResults {
            resources,
            categories,
        }
    }

    /// Up to `n` resources in uniformly random order
    pub fn random_sample(&self, n: usize, rng: &mut fastrand::Rng) -> Vec<&Resource> {
        let mut items: Vec<_> = self.resources.iter().collect();
        rng.shuffle(&mut items);
        items.truncate(n);
        items
    }

    /// [`random_sample`](Self::random_sample) with a freshly seeded generator
    pub fn random_sample_unseeded(&self, n: usize) -> Vec<&Resource> {
        self.random_sample(n, &mut fastrand::Rng::new())
    }

    /// Distinct tags, sorted
    pub fn all_tags(&self) -> Vec<String> {
        self.resources
            .iter()
            .flat_map(|r| r.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct languages, sorted
    pub fn all_languages(&self) -> Vec<String> {
        self.resources
            .iter()
            .filter_map(|r| r.language.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct frameworks, sorted
    pub fn all_frameworks(&self) -> Vec<String> {
        self.resources
            .iter()
            .filter_map(|r| r.framework.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct author names, sorted
    pub fn all_authors(&self) -> Vec<String> {
        self.resources
            .iter()
            .map(|r| r.author.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of resources referencing `category_id`
    pub fn count_in_category(&self, category_id: &str) -> usize {
        self.resources
            .iter()
            .filter(|r| r.category_id == category_id)
            .count()
    }

    /// Categories with `resource_count` recomputed from the resource set
    pub fn categories_with_counts(&self) -> Vec<Category> {
        self.categories
            .iter()
            .map(|c| c.with_count(self.count_in_category(&c.id)))
            .collect()
    }

    /// Normalization warnings plus id/slug collisions, dangling category
    /// references and authored count drift
    pub fn consistency_warnings(&self) -> Vec<BuildWarning> {
        let mut warnings = self.normalize_warnings.clone();

        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for resource in &self.resources {
            if !ids.insert(resource.id.as_str()) {
                warnings.push(BuildWarning::DuplicateId {
                    id: resource.id.clone(),
                });
            }
            if !slugs.insert(resource.slug.as_str()) {
                warnings.push(BuildWarning::DuplicateSlug {
                    slug: resource.slug.clone(),
                });
            }
            if self.category(&resource.category_id).is_none() {
                warnings.push(BuildWarning::UnknownCategory {
                    resource_id: resource.id.clone(),
                    category_id: resource.category_id.clone(),
                });
            }
        }

        for category in &self.categories {
            let actual = self.count_in_category(&category.id);
            if actual != category.resource_count {
                warnings.push(BuildWarning::ResourceCountDrift {
                    category_id: category.id.clone(),
                    declared: category.resource_count,
                    actual,
                });
            }
        }

        warnings
    }

    /// Get the number of resources
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl SearchFilters {
    fn matches(&self, resource: &Resource) -> bool {
        self.resource_type
            .map_or(true, |t| resource.resource_type == t)
            && self.difficulty.map_or(true, |d| resource.difficulty == d)
            && matches_optional(&self.language, resource.language.as_deref())
            && matches_optional(&self.framework, resource.framework.as_deref())
            && self
                .category
                .as_deref()
                .map_or(true, |c| resource.category_id == c)
            && (self.tags.is_empty() || self.tags.iter().any(|t| resource.has_tag(t)))
    }
}

fn matches_optional(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual.is_some_and(|a| a.eq_ignore_ascii_case(wanted)),
    }
}

/// `votes + 0.5 * copies`, plus [`RECENCY_BONUS`] when `last_updated`
/// (midnight UTC) falls within the trending window before `now`
pub fn trending_score(resource: &Resource, now: DateTime<Utc>) -> f64 {
    let updated = resource.last_updated.and_time(NaiveTime::MIN).and_utc();
    let cutoff = now - Duration::days(TRENDING_WINDOW_DAYS);
    let bonus = if updated > cutoff { RECENCY_BONUS } else { 0.0 };

    f64::from(resource.stats.votes) + 0.5 * f64::from(resource.stats.copies) + bonus
}
