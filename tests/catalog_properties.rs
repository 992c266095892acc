//! Catalog Property Tests
//!
//! Invariants of the normalized catalog built from the embedded content.

use std::collections::HashSet;

use catalog_api::domain::{Author, Difficulty, Tool, ToolKind};
use catalog_api::library::{
    normalize, trending_score, Catalog, SearchFilters, StatsMode, FALLBACK_TOOL_CATEGORY_ID,
};
use catalog_api::{ResourceType, SourceRecord, Sources};
use chrono::{NaiveDate, TimeZone, Utc};

fn catalog() -> Catalog {
    Catalog::from_sources(&Sources::embedded().unwrap(), StatsMode::default())
}

#[test]
fn test_category_ids_are_known_or_fallback() {
    let catalog = catalog();
    let known: HashSet<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();

    for resource in &catalog.resources {
        assert!(
            known.contains(resource.category_id.as_str())
                || resource.category_id == FALLBACK_TOOL_CATEGORY_ID,
            "{} has unexpected category {}",
            resource.id,
            resource.category_id
        );
    }
}

#[test]
fn test_ids_and_slugs_are_unique() {
    let catalog = catalog();

    let ids: HashSet<&str> = catalog.resources.iter().map(|r| r.id.as_str()).collect();
    let slugs: HashSet<&str> = catalog.resources.iter().map(|r| r.slug.as_str()).collect();

    assert_eq!(ids.len(), catalog.len());
    assert_eq!(slugs.len(), catalog.len());
}

#[test]
fn test_embedded_catalog_has_no_warnings() {
    let warnings = catalog().consistency_warnings();
    assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
}

#[test]
fn test_order_is_configs_then_prompts_then_tools() {
    let sources = Sources::embedded().unwrap();
    let catalog = Catalog::from_sources(&sources, StatsMode::default());

    let types: Vec<ResourceType> = catalog.resources.iter().map(|r| r.resource_type).collect();
    let mut expected = vec![ResourceType::Configuration; sources.configs.len()];
    expected.extend(vec![ResourceType::PromptTemplate; sources.prompts.len()]);
    expected.extend(vec![ResourceType::External; sources.tools.len()]);

    assert_eq!(types, expected);
    assert_eq!(catalog.resources[0].id, sources.configs[0].id);
}

#[test]
fn test_featured_properties() {
    let catalog = catalog();

    for limit in [0, 1, 3, 12, 100] {
        let featured = catalog.featured(limit);
        assert!(featured.len() <= limit);
        assert!(featured.iter().all(|r| r.featured));
        assert!(featured
            .windows(2)
            .all(|w| w[0].stats.votes >= w[1].stats.votes));
    }
}

#[test]
fn test_popular_properties() {
    let catalog = catalog();
    let popular = catalog.popular(15);

    assert!(popular.len() <= 15);
    assert!(popular
        .windows(2)
        .all(|w| w[0].stats.copies >= w[1].stats.copies));
}

#[test]
fn test_trending_properties() {
    let catalog = catalog();
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
    let trending = catalog.trending_at(10, now);

    assert!(trending.len() <= 10);
    assert!(trending
        .windows(2)
        .all(|w| trending_score(w[0], now) >= trending_score(w[1], now)));
}

#[test]
fn test_trending_bonus_is_exactly_twenty() {
    let catalog = catalog();
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

    let mut recent = catalog.resources[0].clone();
    recent.last_updated = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
    let mut stale = recent.clone();
    stale.last_updated = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

    assert_eq!(trending_score(&recent, now) - trending_score(&stale, now), 20.0);
}

#[test]
fn test_search_react_matches_text_fields() {
    let catalog = catalog();
    let results = catalog.search("react", &SearchFilters::default());

    assert!(!results.resources.is_empty());
    for resource in &results.resources {
        let haystack = format!(
            "{} {} {} {}",
            resource.title,
            resource.description,
            resource.tags.join(" "),
            resource.content.as_deref().unwrap_or("")
        )
        .to_lowercase();
        assert!(haystack.contains("react"), "{} does not mention react", resource.id);
    }

    let touched: HashSet<&str> = results
        .resources
        .iter()
        .map(|r| r.category_id.as_str())
        .collect();
    assert_eq!(results.categories.len(), touched.len());
}

#[test]
fn test_search_external_returns_exactly_tools() {
    let sources = Sources::embedded().unwrap();
    let catalog = Catalog::from_sources(&sources, StatsMode::default());
    let filters = SearchFilters {
        resource_type: Some(ResourceType::External),
        ..Default::default()
    };

    let results = catalog.search("", &filters);
    let found: HashSet<&str> = results.resources.iter().map(|r| r.id.as_str()).collect();
    let tools: HashSet<&str> = sources.tools.iter().map(|t| t.id.as_str()).collect();

    assert_eq!(found, tools);
}

#[test]
fn test_by_id_round_trip() {
    let catalog = catalog();

    for resource in &catalog.resources {
        assert_eq!(catalog.by_id(&resource.id), Some(resource));
        assert_eq!(catalog.by_slug(&resource.slug), Some(resource));
    }
}

#[test]
fn test_source_records_keep_dropped_fields() {
    let catalog = catalog();
    let prompt = catalog.by_type(ResourceType::PromptTemplate)[0];

    match catalog.source(&prompt.id) {
        Some(SourceRecord::Prompt(template)) => {
            assert_eq!(prompt.content.as_deref(), Some(template.prompt.as_str()));
            assert!(!template.variables.is_empty());
        }
        other => panic!("expected prompt source, got {:?}", other),
    }
}

#[test]
fn test_unknown_tool_category_uses_fallback() {
    let tool = Tool {
        id: "tool-mystery".to_string(),
        name: "Mystery".to_string(),
        slug: "mystery".to_string(),
        description: "Uncategorized".to_string(),
        tagline: "Who knows".to_string(),
        url: "https://example.com/mystery".to_string(),
        kind: ToolKind::WebApp,
        category: "Unknown Category".to_string(),
        tags: vec![],
        author: Author {
            name: "Anon".to_string(),
            url: None,
        },
        difficulty: Difficulty::Beginner,
        last_updated: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
    };

    let out = normalize(&[], &[], &[tool], StatsMode::default());

    assert_eq!(out.resources[0].category_id, "tools-cli");
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_filters_by_author_and_tag() {
    let catalog = catalog();

    let team = catalog.by_author("Catalog Team");
    assert!(!team.is_empty());
    assert!(team.iter().all(|r| r.author.name == "Catalog Team"));

    let mcp = catalog.by_tag("mcp");
    assert!(mcp.iter().all(|r| r.category_id == "tools-mcp"));
    assert_eq!(mcp.len(), catalog.by_category("tools-mcp").len());
}

#[test]
fn test_all_tags_sorted_and_distinct() {
    let tags = catalog().all_tags();

    let mut sorted = tags.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(tags, sorted);
}

#[test]
fn test_random_mode_keeps_structure() {
    let sources = Sources::embedded().unwrap();
    let seeded = Catalog::from_sources(&sources, StatsMode::Seeded(1));
    let random = Catalog::from_sources(&sources, StatsMode::Random);

    let seeded_ids: Vec<&str> = seeded.resources.iter().map(|r| r.id.as_str()).collect();
    let random_ids: Vec<&str> = random.resources.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(seeded_ids, random_ids);
}
