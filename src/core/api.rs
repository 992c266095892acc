//! Static JSON API builder.
//!
//! Writes the catalog as a fixed tree of JSON files plus a manifest. Files
//! are written one at a time; the manifest goes last and records the size
//! and SHA-256 of every other file.
//!
//! ```text
//! <output>/
//! ├── manifest.json
//! └── v1/
//!     ├── categories.json
//!     ├── stats.json
//!     ├── resources/
//!     │   ├── index.json
//!     │   ├── configurations.json
//!     │   ├── prompts.json
//!     │   ├── tools.json
//!     │   ├── featured.json
//!     │   ├── popular.json
//!     │   └── trending.json
//!     └── search/
//!         └── index.json
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, info, warn};

use super::envelope::{Envelope, Meta};
use super::error::BuildError;
use super::stats::{CatalogStats, SearchEntry};
use crate::domain::ResourceType;
use crate::library::{BuildWarning, Catalog};

pub const FEATURED_LIMIT: usize = 12;
pub const POPULAR_LIMIT: usize = 15;
pub const TRENDING_LIMIT: usize = 10;

pub const DEFAULT_API_NAME: &str = "claude-resources-api";
pub const DEFAULT_API_VERSION: &str = "1.0.0";
pub const DEFAULT_INDENT: usize = 2;

pub const MANIFEST_PATH: &str = "manifest.json";

/// Logical endpoint name to path relative to the output directory
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("categories", "v1/categories.json"),
    ("resources", "v1/resources/index.json"),
    ("configurations", "v1/resources/configurations.json"),
    ("prompts", "v1/resources/prompts.json"),
    ("tools", "v1/resources/tools.json"),
    ("featured", "v1/resources/featured.json"),
    ("popular", "v1/resources/popular.json"),
    ("trending", "v1/resources/trending.json"),
    ("stats", "v1/stats.json"),
    ("search", "v1/search/index.json"),
];

/// Look up an endpoint's relative path by logical name
pub fn endpoint_path(name: &str) -> Option<&'static str> {
    ENDPOINTS.iter().find(|(n, _)| *n == name).map(|(_, p)| *p)
}

/// Options for a build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Root of the generated tree
    pub output_dir: PathBuf,

    /// JSON indent width in spaces
    pub indent: usize,

    /// Timestamp stamped into every file
    pub generated_at: DateTime<Utc>,

    pub api_name: String,
    pub api_version: String,
}

impl BuildOptions {
    /// Defaults for `output_dir`, stamped with the current time
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            indent: DEFAULT_INDENT,
            generated_at: Utc::now(),
            api_name: DEFAULT_API_NAME.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// A file written by the builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    /// Path relative to the output directory, `/`-separated
    pub path: String,
    pub bytes: u64,
    pub sha256: String,
}

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    pub generated_at: DateTime<Utc>,
    /// Every file written, manifest last
    pub files: Vec<WrittenFile>,
    pub warnings: Vec<BuildWarning>,
    pub stats: CatalogStats,
}

#[derive(Debug, Serialize)]
struct ManifestStats {
    total_resources: usize,
    total_categories: usize,
    total_tags: usize,
    featured_count: usize,
}

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    name: &'a str,
    version: &'a str,
    generated_at: DateTime<Utc>,
    endpoints: BTreeMap<&'static str, &'static str>,
    stats: ManifestStats,
    files: &'a [WrittenFile],
    warnings: Vec<String>,
    meta: Meta,
}

/// Writes the API tree for a catalog
#[derive(Debug)]
pub struct ApiBuilder {
    options: BuildOptions,
}

impl ApiBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    fn meta(&self) -> Meta {
        Meta::new(self.options.generated_at, &self.options.api_version)
    }

    /// Regenerate the whole tree. Any filesystem error aborts the build.
    pub async fn build(&self, catalog: &Catalog) -> Result<BuildReport, BuildError> {
        let now = self.options.generated_at;
        let warnings = catalog.consistency_warnings();
        for warning in &warnings {
            warn!("{}", warning);
        }

        info!(
            output = %self.options.output_dir.display(),
            resources = catalog.len(),
            "Building API"
        );

        let mut files = Vec::with_capacity(ENDPOINTS.len() + 1);

        let categories = catalog.categories_with_counts();
        let envelope = self.envelope(
            "categories",
            &categories,
            self.meta().with_total(categories.len()),
        )?;
        files.push(self.write_json("categories", &envelope).await?);

        let envelope = self.envelope(
            "resources",
            &catalog.resources,
            self.meta().with_total(catalog.len()),
        )?;
        files.push(self.write_json("resources", &envelope).await?);

        for (endpoint, resource_type) in [
            ("configurations", ResourceType::Configuration),
            ("prompts", ResourceType::PromptTemplate),
            ("tools", ResourceType::External),
        ] {
            let items = catalog.by_type(resource_type);
            let meta = self
                .meta()
                .with_total(items.len())
                .with_type(resource_type);
            let envelope = self.envelope("resources", &items, meta)?;
            files.push(self.write_json(endpoint, &envelope).await?);
        }

        for (endpoint, limit, items, description) in [
            (
                "featured",
                FEATURED_LIMIT,
                catalog.featured(FEATURED_LIMIT),
                "Featured resources, most votes first",
            ),
            (
                "popular",
                POPULAR_LIMIT,
                catalog.popular(POPULAR_LIMIT),
                "Most copied resources",
            ),
            (
                "trending",
                TRENDING_LIMIT,
                catalog.trending_at(TRENDING_LIMIT, now),
                "Votes plus half of copies, with a bonus for recent updates",
            ),
        ] {
            let meta = self
                .meta()
                .with_total(items.len())
                .with_limit(limit)
                .with_description(description);
            let envelope = self.envelope("resources", &items, meta)?;
            files.push(self.write_json(endpoint, &envelope).await?);
        }

        let stats = CatalogStats::compute(catalog);
        let envelope = self.envelope("stats", &stats, self.meta())?;
        files.push(self.write_json("stats", &envelope).await?);

        let entries: Vec<SearchEntry<'_>> = catalog.resources.iter().map(SearchEntry::from).collect();
        let envelope = self
            .envelope("resources", &entries, self.meta().with_total(entries.len()))?
            .with("tags", catalog.all_tags())
            .and_then(|e| e.with("languages", catalog.all_languages()))
            .and_then(|e| e.with("frameworks", catalog.all_frameworks()))
            .and_then(|e| e.with("authors", catalog.all_authors()))
            .map_err(|source| BuildError::Serialize {
                path: "v1/search/index.json".to_string(),
                source,
            })?;
        files.push(self.write_json("search", &envelope).await?);

        let manifest = Manifest {
            name: &self.options.api_name,
            version: &self.options.api_version,
            generated_at: now,
            endpoints: ENDPOINTS.iter().copied().collect(),
            stats: ManifestStats {
                total_resources: stats.total_resources,
                total_categories: stats.total_categories,
                total_tags: stats.total_tags,
                featured_count: stats.featured_count,
            },
            files: &files,
            warnings: warnings.iter().map(ToString::to_string).collect(),
            meta: self.meta().with_total(files.len()),
        };
        let written = self.write_file(MANIFEST_PATH, &manifest).await?;
        files.push(written);

        info!(files = files.len(), warnings = warnings.len(), "API build complete");

        Ok(BuildReport {
            output_dir: self.options.output_dir.clone(),
            generated_at: now,
            files,
            warnings,
            stats,
        })
    }

    fn envelope(
        &self,
        key: &'static str,
        data: impl Serialize,
        meta: Meta,
    ) -> Result<Envelope, BuildError> {
        Envelope::new(key, data, meta).map_err(|source| BuildError::Serialize {
            path: key.to_string(),
            source,
        })
    }

    async fn write_json(
        &self,
        endpoint: &str,
        value: &impl Serialize,
    ) -> Result<WrittenFile, BuildError> {
        let relative = endpoint_path(endpoint)
            .ok_or_else(|| BuildError::UnknownEndpoint(endpoint.to_string()))?;
        self.write_file(relative, value).await
    }

    /// Serialize `value` and write it under the output directory, creating
    /// parent directories as needed
    async fn write_file(
        &self,
        relative: &str,
        value: &impl Serialize,
    ) -> Result<WrittenFile, BuildError> {
        let bytes = self.to_pretty_json(value).map_err(|source| BuildError::Serialize {
            path: relative.to_string(),
            source,
        })?;

        let path = self.options.output_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| BuildError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        fs::write(&path, &bytes)
            .await
            .map_err(|source| BuildError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(path = relative, bytes = bytes.len(), "Wrote file");

        Ok(WrittenFile {
            path: relative.to_string(),
            bytes: bytes.len() as u64,
            sha256: hex::encode(Sha256::digest(&bytes)),
        })
    }

    fn to_pretty_json(&self, value: &impl Serialize) -> serde_json::Result<Vec<u8>> {
        let indent = vec![b' '; self.options.indent];
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&indent));
        value.serialize(&mut serializer)?;
        buf.push(b'\n');
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Sources;
    use crate::library::StatsMode;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn catalog() -> Catalog {
        Catalog::from_sources(&Sources::embedded().unwrap(), StatsMode::default())
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(endpoint_path("stats"), Some("v1/stats.json"));
        assert_eq!(endpoint_path("search"), Some("v1/search/index.json"));
        assert_eq!(endpoint_path("nope"), None);
        assert_eq!(ENDPOINTS.len(), 10);
    }

    #[tokio::test]
    async fn test_indent_width_is_respected() {
        let temp = TempDir::new().unwrap();
        let options = BuildOptions::new(temp.path()).with_indent(4);
        ApiBuilder::new(options).build(&catalog()).await.unwrap();

        let text = std::fs::read_to_string(temp.path().join("v1/stats.json")).unwrap();
        assert!(text.starts_with("{\n    \"stats\""));
        assert!(text.ends_with("}\n"));
    }

    #[tokio::test]
    async fn test_report_lists_manifest_last() {
        let temp = TempDir::new().unwrap();
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let options = BuildOptions::new(temp.path()).with_generated_at(at);

        let report = ApiBuilder::new(options).build(&catalog()).await.unwrap();

        assert_eq!(report.files.len(), ENDPOINTS.len() + 1);
        assert_eq!(report.files.last().unwrap().path, MANIFEST_PATH);
        assert_eq!(report.generated_at, at);
        for file in &report.files {
            let on_disk = std::fs::metadata(temp.path().join(&file.path)).unwrap();
            assert_eq!(on_disk.len(), file.bytes);
            assert_eq!(file.sha256.len(), 64);
        }
    }

    #[tokio::test]
    async fn test_write_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        // A regular file where the output directory should be
        let blocker = temp.path().join("api");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = ApiBuilder::new(BuildOptions::new(&blocker))
            .build(&catalog())
            .await;

        assert!(matches!(result, Err(BuildError::CreateDir { .. })));
    }

    #[tokio::test]
    async fn test_unknown_endpoint_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let builder = ApiBuilder::new(BuildOptions::new(temp.path()));

        let result = builder.write_json("featred", &serde_json::json!({})).await;

        assert!(matches!(result, Err(BuildError::UnknownEndpoint(name)) if name == "featred"));
        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
