//! Concept model returned by the concept read service

use serde::{Deserialize, Serialize};

/// Resolved descriptive record for a concept
///
/// `id` is authoritative: after a concept merge it names the surviving
/// concept rather than the one that was requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: String,

    #[serde(default)]
    pub api_url: String,

    #[serde(default)]
    pub pref_label: String,

    /// Most specific type, when the service sends a single one
    #[serde(rename = "type", default)]
    pub concept_type: String,

    /// Type hierarchy, least to most specific
    #[serde(default)]
    pub types: Vec<String>,

    #[serde(rename = "isFTAuthor", default)]
    pub is_ft_author: bool,
}

impl Concept {
    /// The type to copy onto annotations: `type` if set, else the most specific of `types`
    pub fn primary_type(&self) -> &str {
        if !self.concept_type.is_empty() {
            return &self.concept_type;
        }
        self.types.last().map(String::as_str).unwrap_or("")
    }
}
