//! Canonical (PAC) predicate vocabulary

use once_cell::sync::Lazy;
use std::collections::HashSet;

pub const ABOUT: &str = "http://www.ft.com/ontology/annotation/about";
pub const MENTIONS: &str = "http://www.ft.com/ontology/annotation/mentions";
pub const IS_CLASSIFIED_BY: &str = "http://www.ft.com/ontology/classification/isClassifiedBy";
pub const HAS_AUTHOR: &str = "http://www.ft.com/ontology/annotation/hasAuthor";
pub const HAS_CONTRIBUTOR: &str = "http://www.ft.com/ontology/hasContributor";
pub const HAS_DISPLAY_TAG: &str = "http://www.ft.com/ontology/hasDisplayTag";

static PAC_PREDICATES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        ABOUT,
        MENTIONS,
        IS_CLASSIFIED_BY,
        HAS_AUTHOR,
        HAS_CONTRIBUTOR,
        HAS_DISPLAY_TAG,
    ]
    .into_iter()
    .collect()
});

/// Whether `predicate` belongs to the canonical predicate vocabulary
pub fn is_valid_pac_predicate(predicate: &str) -> bool {
    PAC_PREDICATES.contains(predicate)
}
