//! Build configuration.
//!
//! Configuration sources (highest priority first):
//! 1. Command-line flags (applied by the CLI)
//! 2. Environment variable CATALOG_API_SEED
//! 3. Config file (.catalog-api/config.yaml)
//! 4. Defaults (<project root>/api, indent 2, seed 42)
//!
//! Config file discovery:
//! - Searches the start directory and its parents for .catalog-api/config.yaml
//! - The project root is the directory containing .catalog-api/
//! - Relative paths in the config file resolve against the project root

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::api::{DEFAULT_API_NAME, DEFAULT_API_VERSION, DEFAULT_INDENT};
use crate::library::normalize::{StatsMode, DEFAULT_SEED};

/// Directory holding the config file
pub const CONFIG_DIR: &str = ".catalog-api";

/// Config file name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.yaml";

/// Output directory name under the project root
pub const DEFAULT_OUTPUT_DIR: &str = "api";

pub const ENV_SEED: &str = "CATALOG_API_SEED";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Output directory (relative to project root)
    pub dir: Option<String>,
    /// JSON indent width
    pub indent: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsConfig {
    pub seed: Option<u64>,
    /// Ignore the seed and draw fresh stats every build
    #[serde(default)]
    pub random: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiConfig {
    pub name: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Directory of YAML catalogs replacing the embedded ones
    pub dir: Option<String>,
}

/// Environment overrides, captured once
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub seed: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            seed: std::env::var(ENV_SEED).ok(),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory containing .catalog-api/, or the start directory
    pub project_root: PathBuf,
    /// Where the API tree is written
    pub output_dir: PathBuf,
    /// JSON indent width
    pub indent: usize,
    /// Placeholder stats generation
    pub stats_mode: StatsMode,
    pub api_name: String,
    pub api_version: String,
    /// External catalog directory, if any
    pub content_dir: Option<PathBuf>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

fn parse_seed(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .with_context(|| format!("Invalid {} value: {}", ENV_SEED, raw))
}

/// Load configuration starting the config file search at `start`
pub fn load_config(start: &Path, env: &EnvOverrides) -> Result<ResolvedConfig> {
    let config_file = find_config_file(start);

    let (project_root, file) = match &config_file {
        Some(path) => {
            let file = load_config_file(path)?;
            // Project root is the parent of .catalog-api/
            let root = path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(start)
                .to_path_buf();
            (root, Some(file))
        }
        None => (start.to_path_buf(), None),
    };

    let output_dir = match file.as_ref().and_then(|f| f.output.dir.as_deref()) {
        Some(dir) => resolve_path(&project_root, dir),
        None => project_root.join(DEFAULT_OUTPUT_DIR),
    };

    let stats_mode = match (&env.seed, &file) {
        (Some(seed), _) => StatsMode::Seeded(parse_seed(seed)?),
        (None, Some(f)) if f.stats.random => StatsMode::Random,
        (None, Some(f)) => StatsMode::Seeded(f.stats.seed.unwrap_or(DEFAULT_SEED)),
        (None, None) => StatsMode::default(),
    };

    let indent = file
        .as_ref()
        .and_then(|f| f.output.indent)
        .unwrap_or(DEFAULT_INDENT);
    let api_name = file
        .as_ref()
        .and_then(|f| f.api.name.clone())
        .unwrap_or_else(|| DEFAULT_API_NAME.to_string());
    let api_version = file
        .as_ref()
        .and_then(|f| f.api.version.clone())
        .unwrap_or_else(|| DEFAULT_API_VERSION.to_string());
    let content_dir = file
        .as_ref()
        .and_then(|f| f.content.dir.as_deref())
        .map(|dir| resolve_path(&project_root, dir));

    Ok(ResolvedConfig {
        project_root,
        output_dir,
        indent,
        stats_mode,
        api_name,
        api_version,
        content_dir,
        config_file,
    })
}

/// Load configuration from the current directory and process environment
pub fn config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    load_config(&cwd, &EnvOverrides::from_env())
}
