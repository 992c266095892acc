//! API Build Tests
//!
//! End-to-end builds into a temporary directory.

use std::collections::BTreeSet;
use std::path::Path;

use catalog_api::core::{ENDPOINTS, MANIFEST_PATH};
use catalog_api::{ApiBuilder, BuildOptions, Catalog, Sources, StatsMode};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tempfile::TempDir;

fn catalog(mode: StatsMode) -> Catalog {
    Catalog::from_sources(&Sources::embedded().unwrap(), mode)
}

fn options(dir: &Path) -> BuildOptions {
    BuildOptions::new(dir)
        .with_generated_at(Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap())
}

fn read_json(dir: &Path, relative: &str) -> Value {
    let text = std::fs::read_to_string(dir.join(relative)).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn ids(value: &Value) -> BTreeSet<String> {
    value["resources"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_build_writes_eleven_json_files() {
    let temp = TempDir::new().unwrap();
    let report = ApiBuilder::new(options(temp.path()))
        .build(&catalog(StatsMode::default()))
        .await
        .unwrap();

    assert_eq!(report.files.len(), 11);
    assert_eq!(report.files.last().unwrap().path, MANIFEST_PATH);

    let mut paths: Vec<&str> = ENDPOINTS.iter().map(|(_, p)| *p).collect();
    paths.push(MANIFEST_PATH);

    for path in paths {
        let value = read_json(temp.path(), path);
        assert_eq!(
            value["meta"]["generated_at"], "2026-10-19T08:30:00Z",
            "{} is missing meta.generated_at",
            path
        );
    }
}

#[tokio::test]
async fn test_manifest_totals_match_index() {
    let temp = TempDir::new().unwrap();
    ApiBuilder::new(options(temp.path()))
        .build(&catalog(StatsMode::default()))
        .await
        .unwrap();

    let manifest = read_json(temp.path(), MANIFEST_PATH);
    let index = read_json(temp.path(), "v1/resources/index.json");

    assert_eq!(manifest["stats"]["total_resources"], index["meta"]["total"]);
    assert_eq!(
        index["meta"]["total"].as_u64().unwrap() as usize,
        index["resources"].as_array().unwrap().len()
    );
    assert_eq!(manifest["endpoints"]["search"], "v1/search/index.json");
    assert_eq!(manifest["files"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_type_endpoints_partition_index() {
    let temp = TempDir::new().unwrap();
    ApiBuilder::new(options(temp.path()))
        .build(&catalog(StatsMode::default()))
        .await
        .unwrap();

    let index = ids(&read_json(temp.path(), "v1/resources/index.json"));
    let configs = read_json(temp.path(), "v1/resources/configurations.json");
    let prompts = read_json(temp.path(), "v1/resources/prompts.json");
    let tools = read_json(temp.path(), "v1/resources/tools.json");

    assert_eq!(configs["meta"]["type"], "CONFIGURATION");
    assert_eq!(prompts["meta"]["type"], "PROMPT_TEMPLATE");
    assert_eq!(tools["meta"]["type"], "EXTERNAL");

    let mut union = ids(&configs);
    union.extend(ids(&prompts));
    union.extend(ids(&tools));
    assert_eq!(union, index);
}

#[tokio::test]
async fn test_ranked_endpoints_respect_limits() {
    let temp = TempDir::new().unwrap();
    ApiBuilder::new(options(temp.path()))
        .build(&catalog(StatsMode::default()))
        .await
        .unwrap();

    for (path, limit) in [
        ("v1/resources/featured.json", 12),
        ("v1/resources/popular.json", 15),
        ("v1/resources/trending.json", 10),
    ] {
        let value = read_json(temp.path(), path);
        let items = value["resources"].as_array().unwrap();
        assert!(items.len() <= limit);
        assert_eq!(value["meta"]["limit"], limit);
        assert_eq!(value["meta"]["total"], items.len());
    }

    let featured = read_json(temp.path(), "v1/resources/featured.json");
    assert!(featured["resources"]
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["featured"] == true));
}

#[tokio::test]
async fn test_categories_carry_computed_counts() {
    let temp = TempDir::new().unwrap();
    let catalog = catalog(StatsMode::default());
    ApiBuilder::new(options(temp.path()))
        .build(&catalog)
        .await
        .unwrap();

    let value = read_json(temp.path(), "v1/categories.json");
    for category in value["categories"].as_array().unwrap() {
        let id = category["id"].as_str().unwrap();
        assert_eq!(
            category["resourceCount"].as_u64().unwrap() as usize,
            catalog.count_in_category(id)
        );
    }
}

#[tokio::test]
async fn test_search_index_omits_heavy_fields() {
    let temp = TempDir::new().unwrap();
    ApiBuilder::new(options(temp.path()))
        .build(&catalog(StatsMode::default()))
        .await
        .unwrap();

    let search = read_json(temp.path(), "v1/search/index.json");
    let first = &search["resources"][0];

    assert!(first.get("content").is_none());
    assert!(first.get("stats").is_none());
    assert!(first["author"].is_string());
    assert!(!search["tags"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rebuild_is_structurally_idempotent() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    ApiBuilder::new(options(first.path()))
        .build(&catalog(StatsMode::Random))
        .await
        .unwrap();
    ApiBuilder::new(options(second.path()))
        .build(&catalog(StatsMode::Random))
        .await
        .unwrap();

    // Featured size follows the random featured flags; the rest is fixed by the sources
    for path in [
        "v1/categories.json",
        "v1/resources/index.json",
        "v1/resources/configurations.json",
        "v1/resources/prompts.json",
        "v1/resources/tools.json",
        "v1/search/index.json",
    ] {
        let a = read_json(first.path(), path);
        let b = read_json(second.path(), path);
        assert_eq!(a["meta"]["total"], b["meta"]["total"], "{}", path);
    }

    let a = read_json(first.path(), "v1/resources/index.json");
    let b = read_json(second.path(), "v1/resources/index.json");
    assert_eq!(ids(&a), ids(&b));
}

#[tokio::test]
async fn test_same_seed_builds_identical_files() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let a = ApiBuilder::new(options(first.path()))
        .build(&catalog(StatsMode::Seeded(7)))
        .await
        .unwrap();
    let b = ApiBuilder::new(options(second.path()))
        .build(&catalog(StatsMode::Seeded(7)))
        .await
        .unwrap();

    assert_eq!(a.files, b.files);
    assert_eq!(a.stats.featured_count, b.stats.featured_count);

    let featured_a = read_json(first.path(), "v1/resources/featured.json");
    let featured_b = read_json(second.path(), "v1/resources/featured.json");
    assert_eq!(featured_a["meta"]["total"], featured_b["meta"]["total"]);
    assert_eq!(ids(&featured_a), ids(&featured_b));
}

#[tokio::test]
async fn test_rebuild_overwrites_existing_tree() {
    let temp = TempDir::new().unwrap();
    let builder = ApiBuilder::new(options(temp.path()));

    std::fs::create_dir_all(temp.path().join("v1")).unwrap();
    std::fs::write(temp.path().join("v1/categories.json"), "stale").unwrap();

    builder.build(&catalog(StatsMode::default())).await.unwrap();
    let value = read_json(temp.path(), "v1/categories.json");

    assert!(value["categories"].is_array());
}
