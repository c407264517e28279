//! Upstream to canonical predicate mapping
//!
//! UPP publishes annotations in its own ontology. Before they can be used as
//! drafts every record's predicate is translated to the canonical vocabulary,
//! implicit relations are discarded and anything else passes through
//! untouched. Records are handled as raw JSON objects so fields this service
//! does not model survive the conversion.

use crate::annotations::predicates::{ABOUT, HAS_AUTHOR, IS_CLASSIFIED_BY};
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

const MAJOR_MENTIONS: &str = "http://www.ft.com/ontology/annotation/majorMentions";
const IS_PRIMARILY_CLASSIFIED_BY: &str =
    "http://www.ft.com/ontology/classification/isPrimarilyClassifiedBy";
const IMPLICITLY_CLASSIFIED_BY: &str = "http://www.ft.com/ontology/implicitlyClassifiedBy";
const IMPLICITLY_ABOUT: &str = "http://www.ft.com/ontology/implicitlyAbout";
const LEGACY_HAS_AUTHOR: &str = "http://www.ft.com/ontology/hasAuthor";

/// Local-name prefix of derived relations that never become drafts
const IMPLICIT_PREFIX: &str = "implicitly";

const PREDICATE_FIELD: &str = "predicate";

/// Mapper errors
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("Unable to parse annotations payload: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Unable to encode converted annotations: {0}")]
    Serialize(serde_json::Error),
}

/// What happens to a record carrying a given upstream predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateMapping {
    /// Replace the predicate
    Translate(&'static str),
    /// Omit the record
    Discard,
    /// Emit the record unchanged
    PassThrough,
}

static PREDICATE_TABLE: Lazy<HashMap<&'static str, PredicateMapping>> = Lazy::new(|| {
    HashMap::from([
        (MAJOR_MENTIONS, PredicateMapping::Translate(ABOUT)),
        (
            IS_PRIMARILY_CLASSIFIED_BY,
            PredicateMapping::Translate(IS_CLASSIFIED_BY),
        ),
        (LEGACY_HAS_AUTHOR, PredicateMapping::Translate(HAS_AUTHOR)),
        (IMPLICITLY_CLASSIFIED_BY, PredicateMapping::Discard),
        (IMPLICITLY_ABOUT, PredicateMapping::Discard),
    ])
});

/// Mapping rule for `predicate`
pub fn map_predicate(predicate: &str) -> PredicateMapping {
    if let Some(mapping) = PREDICATE_TABLE.get(predicate) {
        return *mapping;
    }
    if is_implicit(predicate) {
        return PredicateMapping::Discard;
    }
    PredicateMapping::PassThrough
}

fn is_implicit(predicate: &str) -> bool {
    let local_name = predicate
        .rsplit(|c: char| c == '/' || c == '#')
        .next()
        .unwrap_or(predicate);
    local_name.starts_with(IMPLICIT_PREFIX)
}

/// Translate an upstream annotations array to the canonical vocabulary
///
/// Returns `Ok(None)` when nothing is left: a blank body, JSON `null`, an
/// empty array, or every record discarded. Callers treat that as "not found", distinct from
/// an explicit empty list.
pub fn convert_predicates(body: &[u8]) -> Result<Option<Vec<u8>>, MapperError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let records: Option<Vec<Map<String, Value>>> = serde_json::from_slice(body)?;

    let converted: Vec<Map<String, Value>> = records
        .unwrap_or_default()
        .into_iter()
        .filter_map(convert_record)
        .collect();

    if converted.is_empty() {
        return Ok(None);
    }

    serde_json::to_vec(&converted)
        .map(Some)
        .map_err(MapperError::Serialize)
}

fn convert_record(mut record: Map<String, Value>) -> Option<Map<String, Value>> {
    let mapping = match record.get(PREDICATE_FIELD).and_then(Value::as_str) {
        Some(predicate) => map_predicate(predicate),
        None => PredicateMapping::PassThrough,
    };

    match mapping {
        PredicateMapping::Translate(canonical) => {
            record.insert(
                PREDICATE_FIELD.to_string(),
                Value::String(canonical.to_string()),
            );
            Some(record)
        }
        PredicateMapping::Discard => None,
        PredicateMapping::PassThrough => Some(record),
    }
}
