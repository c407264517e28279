//! Annotation canonicalization
//!
//! Reduces a client- or upstream-supplied annotation list to the canonical
//! set: invalid predicates removed, concept ids rewritten to the thing URI,
//! duplicates on `(predicate, concept id)` collapsed.

use super::{dedup_by_key, is_valid_pac_predicate, Annotation};
use draft_common::uuid_utils;

/// Canonicalizes annotation sets before they are augmented or stored
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer;

impl Canonicalizer {
    pub fn new() -> Self {
        Self
    }

    /// Canonical form of `annotations`
    ///
    /// Never fails. The first occurrence of each key is kept; callers must
    /// not rely on the resulting order (see [`sort_canonical`]).
    pub fn canonicalize(&self, annotations: Vec<Annotation>) -> Vec<Annotation> {
        dedup_by_key(
            annotations
                .into_iter()
                .filter(|annotation| is_valid_pac_predicate(&annotation.predicate))
                .map(|mut annotation| {
                    annotation.concept_id = canonical_concept_id(&annotation.concept_id);
                    annotation
                }),
        )
    }
}

/// Rewrite a UUID-bearing concept id to `http://www.ft.com/thing/<uuid>`
///
/// Accepts any URI whose last segment is a UUID, or a bare UUID. Anything
/// else is returned unchanged.
pub fn canonical_concept_id(concept_id: &str) -> String {
    let segment = uuid_utils::extract_uuid(concept_id);
    if !segment.is_empty() && uuid_utils::parse(segment).is_ok() {
        return uuid_utils::thing_uri(segment);
    }
    if uuid_utils::parse(concept_id).is_ok() {
        return uuid_utils::thing_uri(concept_id);
    }
    concept_id.to_string()
}

/// Sort annotations by `(predicate, concept id)` for a stable stored form
pub fn sort_canonical(annotations: &mut [Annotation]) {
    annotations.sort_by(|a, b| {
        a.predicate
            .cmp(&b.predicate)
            .then_with(|| a.concept_id.cmp(&b.concept_id))
    });
}
