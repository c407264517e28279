//! Annotation and concept fixtures shared by the integration tests

use draft_annotations_api::annotations::predicates::{HAS_CONTRIBUTOR, IS_CLASSIFIED_BY, MENTIONS};
use draft_annotations_api::annotations::Annotation;
use draft_annotations_api::concept::Concept;
use std::collections::HashMap;

pub const CONTENT_UUID: &str = "83a201c6-60cd-11e7-91a7-502f7ee26895";

pub const CLASSIFIED_UUID: &str = "b224ad07-c818-3ad6-94af-a4d351dbb619";
pub const UNRESOLVED_MENTION_UUID: &str = "1a2a1a0a-7199-38b8-8a73-e651e2172471";
pub const CONTRIBUTOR_UUID: &str = "5bd49568-6d7c-3c10-a5b0-2f3fd5974a6b";
pub const OTHER_UNRESOLVED_MENTION_UUID: &str = "1fb3faf1-bf00-3a15-8efb-1038a59653f7";
pub const REDIRECTED_UUID: &str = "7b7dafa0-d54e-4c1d-8e22-3d452792acd2";
pub const REDIRECT_TARGET_UUID: &str = "28f8d585-37ea-4879-ae1c-f6c0580a43b8";

pub fn thing(uuid: &str) -> String {
    format!("http://www.ft.com/thing/{}", uuid)
}

pub fn api_url(uuid: &str) -> String {
    format!("http://api.ft.com/things/{}", uuid)
}

/// Five canonical annotations, two of which never resolve
pub fn canonicalized_annotations() -> Vec<Annotation> {
    vec![
        Annotation::new(IS_CLASSIFIED_BY, thing(CLASSIFIED_UUID)),
        Annotation::new(MENTIONS, thing(UNRESOLVED_MENTION_UUID)),
        Annotation::new(HAS_CONTRIBUTOR, thing(CONTRIBUTOR_UUID)),
        Annotation::new(MENTIONS, thing(OTHER_UNRESOLVED_MENTION_UUID)),
        Annotation::new(MENTIONS, thing(REDIRECTED_UUID)),
    ]
}

/// Concept store contents; the redirected UUID resolves to its merge target
pub fn concepts() -> HashMap<String, Concept> {
    HashMap::from([
        (
            CLASSIFIED_UUID.to_string(),
            Concept {
                id: thing(CLASSIFIED_UUID),
                api_url: api_url(CLASSIFIED_UUID),
                pref_label: "Analysis".to_string(),
                concept_type: "http://www.ft.com/ontology/Genre".to_string(),
                ..Default::default()
            },
        ),
        (
            CONTRIBUTOR_UUID.to_string(),
            Concept {
                id: thing(CONTRIBUTOR_UUID),
                api_url: api_url(CONTRIBUTOR_UUID),
                pref_label: "Emma Jacobs".to_string(),
                concept_type: "http://www.ft.com/ontology/person/Person".to_string(),
                is_ft_author: true,
                ..Default::default()
            },
        ),
        (
            REDIRECTED_UUID.to_string(),
            Concept {
                id: thing(REDIRECT_TARGET_UUID),
                api_url: api_url(REDIRECT_TARGET_UUID),
                pref_label: "Apple".to_string(),
                types: vec![
                    "http://www.ft.com/ontology/core/Thing".to_string(),
                    "http://www.ft.com/ontology/organisation/Organisation".to_string(),
                ],
                ..Default::default()
            },
        ),
    ])
}

/// What [`canonicalized_annotations`] augments to against [`concepts`]
pub fn expected_augmented() -> Vec<Annotation> {
    vec![
        Annotation {
            api_url: api_url(CLASSIFIED_UUID),
            pref_label: "Analysis".to_string(),
            concept_type: "http://www.ft.com/ontology/Genre".to_string(),
            ..Annotation::new(IS_CLASSIFIED_BY, thing(CLASSIFIED_UUID))
        },
        Annotation {
            api_url: api_url(CONTRIBUTOR_UUID),
            pref_label: "Emma Jacobs".to_string(),
            concept_type: "http://www.ft.com/ontology/person/Person".to_string(),
            is_ft_author: true,
            ..Annotation::new(HAS_CONTRIBUTOR, thing(CONTRIBUTOR_UUID))
        },
        Annotation {
            api_url: api_url(REDIRECT_TARGET_UUID),
            pref_label: "Apple".to_string(),
            concept_type: "http://www.ft.com/ontology/organisation/Organisation".to_string(),
            ..Annotation::new(MENTIONS, thing(REDIRECT_TARGET_UUID))
        },
    ]
}
