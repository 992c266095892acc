//! Hand-authored catalog content.
//!
//! The catalogs ship embedded in the binary as YAML. A directory with the
//! same four files can replace them at build time (`content.dir` in the
//! config file).
//!
//! ```text
//! <content dir>/
//! ├── categories.yaml
//! ├── configs.yaml
//! ├── prompts.yaml
//! └── tools.yaml
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tokio::fs;

use crate::domain::{Category, ClaudeMdConfig, PromptTemplate, Tool};

const CATEGORIES_YAML: &str = include_str!("data/categories.yaml");
const CONFIGS_YAML: &str = include_str!("data/configs.yaml");
const PROMPTS_YAML: &str = include_str!("data/prompts.yaml");
const TOOLS_YAML: &str = include_str!("data/tools.yaml");

/// The raw entity catalogs, before normalization
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub categories: Vec<Category>,
    pub configs: Vec<ClaudeMdConfig>,
    pub prompts: Vec<PromptTemplate>,
    pub tools: Vec<Tool>,
}

impl Sources {
    /// Catalogs compiled into the binary
    pub fn embedded() -> Result<Self> {
        Ok(Self {
            categories: parse("categories.yaml", CATEGORIES_YAML)?,
            configs: parse("configs.yaml", CONFIGS_YAML)?,
            prompts: parse("prompts.yaml", PROMPTS_YAML)?,
            tools: parse("tools.yaml", TOOLS_YAML)?,
        })
    }

    /// Load catalogs from a directory
    pub async fn load_dir(dir: &Path) -> Result<Self> {
        Ok(Self {
            categories: read(dir, "categories.yaml").await?,
            configs: read(dir, "configs.yaml").await?,
            prompts: read(dir, "prompts.yaml").await?,
            tools: read(dir, "tools.yaml").await?,
        })
    }
}

fn parse<T: DeserializeOwned>(name: &str, content: &str) -> Result<Vec<T>> {
    serde_yaml::from_str(content).with_context(|| format!("Failed to parse catalog: {}", name))
}

async fn read<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = dir.join(name);
    let content = fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

    parse(name, &content)
}
