//! The unified, public-facing catalog record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    /// A CLAUDE.md style project configuration
    Configuration,

    /// A reusable prompt with variables
    PromptTemplate,

    /// A link to an external tool
    External,

    /// A standalone code snippet
    CodeSnippet,
}

impl ResourceType {
    /// All variants, in display order
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Configuration,
        ResourceType::PromptTemplate,
        ResourceType::External,
        ResourceType::CodeSnippet,
    ];

    /// Wire name, as serialized
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceType::Configuration => "CONFIGURATION",
            ResourceType::PromptTemplate => "PROMPT_TEMPLATE",
            ResourceType::External => "EXTERNAL",
            ResourceType::CodeSnippet => "CODE_SNIPPET",
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "configuration" | "config" => Ok(ResourceType::Configuration),
            "prompt_template" | "prompt" => Ok(ResourceType::PromptTemplate),
            "external" | "tool" => Ok(ResourceType::External),
            "code_snippet" | "snippet" => Ok(ResourceType::CodeSnippet),
            _ => anyhow::bail!("Unknown resource type: {}", s),
        }
    }
}

/// How much experience a resource assumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => anyhow::bail!("Unknown difficulty: {}", s),
        }
    }
}

/// Who wrote a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Engagement counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStats {
    pub votes: u32,
    pub copies: u32,
}

/// A catalog entry of any origin (configuration, prompt, or tool)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Unique identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Routing key, unique across resources
    pub slug: String,

    /// One-line pitch
    pub tagline: String,

    /// Longer description
    pub description: String,

    /// Foreign key into `Category::id`
    pub category_id: String,

    /// Kind of entry
    #[serde(rename = "type")]
    pub resource_type: ResourceType,

    /// Copyable body text (configurations and prompts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// External link (tools)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub author: Author,

    pub stats: ResourceStats,

    pub difficulty: Difficulty,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    /// Date of the last content edit
    pub last_updated: NaiveDate,

    /// Whether the resource is promoted on the landing page
    pub featured: bool,
}

impl Resource {
    /// Whether the resource carries `tag` (exact match)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match over title, description, tags and content.
    /// `needle` must already be lowercase.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self
                .content
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(needle))
    }
}
