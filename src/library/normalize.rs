//! Resource normalizer.
//!
//! Projects the three source families into the unified [`Resource`] shape:
//! assigns a category id, synthesizes a tagline and attaches placeholder
//! engagement stats. Output order is configs, then prompts, then tools.

use std::ops::Range;

use tracing::{debug, warn};

use super::warnings::BuildWarning;
use crate::domain::{
    ClaudeMdConfig, PromptTemplate, Resource, ResourceStats, ResourceType, SourceRecord, Tool,
};

/// Category id for every configuration
pub const CONFIG_CATEGORY_ID: &str = "claude-configs";

/// Category id for every prompt template
pub const PROMPT_CATEGORY_ID: &str = "prompt-templates";

/// Where tools with an unmapped category label end up
pub const FALLBACK_TOOL_CATEGORY_ID: &str = "tools-cli";

/// Seed used when no seed is configured
pub const DEFAULT_SEED: u64 = 42;

/// Tool category label to category id
const TOOL_CATEGORIES: &[(&str, &str)] = &[
    ("CLI Tools", "tools-cli"),
    ("IDE Extensions", "tools-extensions"),
    ("MCP Servers", "tools-mcp"),
    ("Integrations", "tools-integrations"),
];

/// Map a tool's category label to a category id, if known
pub fn tool_category_id(label: &str) -> Option<&'static str> {
    TOOL_CATEGORIES
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, id)| *id)
}

/// How placeholder stats are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsMode {
    /// Reproducible: the same seed always yields the same stats
    Seeded(u64),

    /// Fresh entropy on every run
    Random,
}

impl Default for StatsMode {
    fn default() -> Self {
        StatsMode::Seeded(DEFAULT_SEED)
    }
}

impl std::fmt::Display for StatsMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsMode::Seeded(seed) => write!(f, "seeded ({})", seed),
            StatsMode::Random => write!(f, "random"),
        }
    }
}

/// Value ranges for one source family
#[derive(Debug, Clone)]
pub struct StatsProfile {
    pub votes: Range<u32>,
    pub copies: Range<u32>,
    pub featured_probability: f64,
}

impl StatsProfile {
    pub fn config() -> Self {
        Self {
            votes: 10..60,
            copies: 50..250,
            featured_probability: 0.3,
        }
    }

    pub fn prompt() -> Self {
        Self {
            votes: 20..100,
            copies: 100..500,
            featured_probability: 0.4,
        }
    }

    pub fn tool() -> Self {
        Self {
            votes: 15..80,
            copies: 5..40,
            featured_probability: 0.2,
        }
    }
}

/// Draws placeholder stats from a PRNG
#[derive(Debug)]
pub struct StatsSampler {
    rng: fastrand::Rng,
}

impl StatsSampler {
    pub fn new(mode: StatsMode) -> Self {
        let rng = match mode {
            StatsMode::Seeded(seed) => fastrand::Rng::with_seed(seed),
            StatsMode::Random => fastrand::Rng::new(),
        };
        Self { rng }
    }

    /// Votes, then copies, then the featured flag
    pub fn sample(&mut self, profile: &StatsProfile) -> (ResourceStats, bool) {
        let votes = self.rng.u32(profile.votes.clone());
        let copies = self.rng.u32(profile.copies.clone());
        let featured = self.rng.f64() < profile.featured_probability;

        (ResourceStats { votes, copies }, featured)
    }
}

/// Result of normalization
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub resources: Vec<Resource>,
    pub warnings: Vec<BuildWarning>,
}

/// Normalize the three source families into one resource sequence
pub fn normalize(
    configs: &[ClaudeMdConfig],
    prompts: &[PromptTemplate],
    tools: &[Tool],
    mode: StatsMode,
) -> Normalized {
    let mut sampler = StatsSampler::new(mode);
    let mut out = Normalized::default();

    let records = configs
        .iter()
        .cloned()
        .map(SourceRecord::Config)
        .chain(prompts.iter().cloned().map(SourceRecord::Prompt))
        .chain(tools.iter().cloned().map(SourceRecord::Tool));

    for record in records {
        let resource = project(&record, &mut sampler, &mut out.warnings);
        out.resources.push(resource);
    }

    debug!(
        resources = out.resources.len(),
        warnings = out.warnings.len(),
        %mode,
        "Normalized catalog"
    );

    out
}

/// Project a single source record. Unmapped tool categories fall back to
/// [`FALLBACK_TOOL_CATEGORY_ID`] and push a warning.
pub fn project(
    record: &SourceRecord,
    sampler: &mut StatsSampler,
    warnings: &mut Vec<BuildWarning>,
) -> Resource {
    match record {
        SourceRecord::Config(config) => {
            let (stats, featured) = sampler.sample(&StatsProfile::config());
            let subject = config
                .framework
                .as_deref()
                .or(config.language.as_deref())
                .unwrap_or("General");

            Resource {
                id: config.id.clone(),
                title: config.title.clone(),
                slug: config.slug.clone(),
                tagline: format!("{} configuration for Claude", subject),
                description: config.description.clone(),
                category_id: CONFIG_CATEGORY_ID.to_string(),
                resource_type: ResourceType::Configuration,
                content: Some(config.content.clone()),
                url: None,
                tags: config.tags.clone(),
                author: config.author.clone(),
                stats,
                difficulty: config.difficulty,
                language: config.language.clone(),
                framework: config.framework.clone(),
                last_updated: config.last_updated,
                featured,
            }
        }
        SourceRecord::Prompt(prompt) => {
            let (stats, featured) = sampler.sample(&StatsProfile::prompt());

            Resource {
                id: prompt.id.clone(),
                title: prompt.title.clone(),
                slug: prompt.slug.clone(),
                tagline: format!("{} prompt template", prompt.category),
                description: prompt.description.clone(),
                category_id: PROMPT_CATEGORY_ID.to_string(),
                resource_type: ResourceType::PromptTemplate,
                content: Some(prompt.prompt.clone()),
                url: None,
                tags: prompt.tags.clone(),
                author: prompt.author.clone(),
                stats,
                difficulty: prompt.difficulty,
                language: None,
                framework: None,
                last_updated: prompt.last_updated,
                featured,
            }
        }
        SourceRecord::Tool(tool) => {
            let (stats, featured) = sampler.sample(&StatsProfile::tool());
            let category_id = match tool_category_id(&tool.category) {
                Some(id) => id,
                None => {
                    warn!(
                        tool = %tool.id,
                        category = %tool.category,
                        fallback = FALLBACK_TOOL_CATEGORY_ID,
                        "Unmapped tool category"
                    );
                    warnings.push(BuildWarning::UnmappedToolCategory {
                        resource_id: tool.id.clone(),
                        category: tool.category.clone(),
                        fallback: FALLBACK_TOOL_CATEGORY_ID.to_string(),
                    });
                    FALLBACK_TOOL_CATEGORY_ID
                }
            };

            Resource {
                id: tool.id.clone(),
                title: tool.name.clone(),
                slug: tool.slug.clone(),
                tagline: tool.tagline.clone(),
                description: tool.description.clone(),
                category_id: category_id.to_string(),
                resource_type: ResourceType::External,
                content: None,
                url: Some(tool.url.clone()),
                tags: tool.tags.clone(),
                author: tool.author.clone(),
                stats,
                difficulty: tool.difficulty,
                language: None,
                framework: None,
                last_updated: tool.last_updated,
                featured,
            }
        }
    }
}
