//! The `{payload, meta}` wrapper every emitted JSON file uses.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::domain::ResourceType;

/// Metadata attached to every file
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Meta {
    /// Build timestamp (RFC 3339)
    pub generated_at: DateTime<Utc>,

    /// API schema version tag
    pub version: String,

    /// Number of items in the primary payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,

    /// Requested limit for ranked endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Resource type for type-filtered endpoints
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Meta {
    pub fn new(generated_at: DateTime<Utc>, version: impl Into<String>) -> Self {
        Self {
            generated_at,
            version: version.into(),
            total: None,
            limit: None,
            resource_type: None,
            description: None,
        }
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_type(mut self, resource_type: ResourceType) -> Self {
        self.resource_type = Some(resource_type);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Named payload entries followed by `meta`, serialized in insertion order
#[derive(Debug, Clone)]
pub struct Envelope {
    entries: Vec<(&'static str, Value)>,
    meta: Meta,
}

impl Envelope {
    /// Envelope with a single payload under `key`
    pub fn new(key: &'static str, data: impl Serialize, meta: Meta) -> serde_json::Result<Self> {
        Self {
            entries: Vec::new(),
            meta,
        }
        .with(key, data)
    }

    /// Add another top-level payload entry
    pub fn with(mut self, key: &'static str, data: impl Serialize) -> serde_json::Result<Self> {
        self.entries.push((key, serde_json::to_value(data)?));
        Ok(self)
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("meta", &self.meta)?;
        map.end()
    }
}
