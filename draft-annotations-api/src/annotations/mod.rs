//! Annotation model and the canonical annotation pipeline
//!
//! - [`predicates`]: canonical (PAC) predicate vocabulary
//! - [`canonicalizer`]: dedup, predicate filtering and concept id normalization
//! - [`augmenter`]: concept lookup and merge of descriptive fields

pub mod augmenter;
pub mod canonicalizer;
pub mod predicates;

pub use augmenter::{AugmentError, Augmenter, ConceptAugmenter};
pub use canonicalizer::{sort_canonical, Canonicalizer};
pub use predicates::is_valid_pac_predicate;

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// A fact relating a piece of content to a concept
///
/// Descriptive fields (`api_url`, `pref_label`, `concept_type`,
/// `is_ft_author`) stay empty until augmentation populates them and are
/// omitted from JSON while empty. An explicit `null` reads like a missing
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    /// Canonical relation URI
    #[serde(default, deserialize_with = "null_as_default")]
    pub predicate: String,

    /// Concept URI
    #[serde(rename = "id", default, deserialize_with = "null_as_default")]
    pub concept_id: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub api_url: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub pref_label: String,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub concept_type: String,

    #[serde(
        rename = "isFTAuthor",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "is_false"
    )]
    pub is_ft_author: bool,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Annotation {
    /// Annotation with only predicate and concept id set
    pub fn new(predicate: impl Into<String>, concept_id: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            concept_id: concept_id.into(),
            ..Default::default()
        }
    }

    /// Identity used for deduplication
    pub fn key(&self) -> ConceptKey {
        ConceptKey {
            predicate: self.predicate.clone(),
            concept_id: self.concept_id.clone(),
        }
    }
}

/// Composite `(predicate, concept id)` identity of an annotation
///
/// Two annotations with the same key are duplicates whatever their
/// descriptive fields hold. Ordering is by predicate, then concept id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptKey {
    pub predicate: String,
    pub concept_id: String,
}

/// Request/response body wrapping a list of annotations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    pub annotations: Vec<Annotation>,
}

/// Drop annotations whose [`ConceptKey`] was already seen; the first occurrence wins
pub fn dedup_by_key<I>(annotations: I) -> Vec<Annotation>
where
    I: IntoIterator<Item = Annotation>,
{
    let mut seen = HashSet::new();
    annotations
        .into_iter()
        .filter(|annotation| seen.insert(annotation.key()))
        .collect()
}
