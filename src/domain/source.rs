//! Hand-authored source records, one shape per origin.
//!
//! Each family is projected into [`Resource`](super::Resource) by the
//! normalizer. The projection is lossy (prompt variables and examples are
//! dropped), so the full record stays reachable through [`SourceRecord`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::resource::{Author, Difficulty};

/// A project configuration file (CLAUDE.md)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeMdConfig {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,

    /// Full configuration text
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub author: Author,
    pub difficulty: Difficulty,
    pub last_updated: NaiveDate,
}

/// A placeholder inside a prompt template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptVariable {
    pub name: String,
    pub description: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// Worked example for a prompt template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptExample {
    pub input: String,
    pub output: String,
}

/// A reusable prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,

    /// Human-readable grouping, e.g. "Code Review"
    pub category: String,

    /// Prompt body with `{{variable}}` placeholders
    pub prompt: String,

    #[serde(default)]
    pub variables: Vec<PromptVariable>,

    #[serde(default)]
    pub examples: Vec<PromptExample>,

    #[serde(default)]
    pub tags: Vec<String>,

    pub author: Author,
    pub difficulty: Difficulty,
    pub last_updated: NaiveDate,
}

/// Distribution channel of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolKind {
    Cli,
    Extension,
    McpServer,
    WebApp,
}

/// An external tool, referenced by URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub tagline: String,
    pub url: String,

    #[serde(rename = "type")]
    pub kind: ToolKind,

    /// Human-readable category, mapped to a category id during normalization
    pub category: String,

    #[serde(default)]
    pub tags: Vec<String>,

    pub author: Author,
    pub difficulty: Difficulty,
    pub last_updated: NaiveDate,
}

/// Any source record, tagged by origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum SourceRecord {
    Config(ClaudeMdConfig),
    Prompt(PromptTemplate),
    Tool(Tool),
}

impl SourceRecord {
    pub fn id(&self) -> &str {
        match self {
            SourceRecord::Config(c) => &c.id,
            SourceRecord::Prompt(p) => &p.id,
            SourceRecord::Tool(t) => &t.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_variable_required_defaults_to_true() {
        let yaml = r#"
name: code
description: The code to review
"#;
        let variable: PromptVariable = serde_yaml::from_str(yaml).unwrap();
        assert!(variable.required);
    }

    #[test]
    fn test_tool_kind_reads_type_field() {
        let yaml = r#"
id: tool-x
name: X
slug: x
description: An example tool
tagline: Does things
url: https://example.com
type: MCP_SERVER
category: MCP Servers
author:
  name: Someone
difficulty: beginner
lastUpdated: "2026-01-02"
"#;
        let tool: Tool = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(tool.kind, ToolKind::McpServer);
        assert!(tool.tags.is_empty());

        let record = SourceRecord::Tool(tool);
        assert_eq!(record.id(), "tool-x");
    }
}
