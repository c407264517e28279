//! Concept augmentation
//!
//! Resolves every concept referenced by a canonical annotation set with one
//! batched lookup and copies the descriptive fields onto the annotations.
//! Annotations whose concept cannot be resolved are dropped with a warning;
//! only a failure of the lookup itself fails the call.

use super::{dedup_by_key, is_valid_pac_predicate, Annotation};
use crate::services::{ConceptError, ConceptReadApi};
use async_trait::async_trait;
use draft_common::transaction::new_transaction_id;
use draft_common::uuid_utils::extract_uuid;
use draft_common::RequestContext;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Augmentation errors
#[derive(Debug, Error)]
pub enum AugmentError {
    #[error("Concept lookup failed: {0}")]
    ConceptLookup(#[from] ConceptError),
}

/// Enriches canonical annotations with concept data
#[async_trait]
pub trait Augmenter: Send + Sync {
    async fn augment_annotations(
        &self,
        ctx: &RequestContext,
        annotations: Vec<Annotation>,
    ) -> Result<Vec<Annotation>, AugmentError>;
}

/// [`Augmenter`] backed by the concept read API
pub struct ConceptAugmenter {
    concept_read: Arc<dyn ConceptReadApi>,
}

impl ConceptAugmenter {
    pub fn new(concept_read: Arc<dyn ConceptReadApi>) -> Self {
        Self { concept_read }
    }
}

/// Context guaranteed to carry a transaction id, and that id
fn ensure_transaction_id(ctx: &RequestContext) -> (RequestContext, String) {
    if let Some(tid) = ctx.transaction_id() {
        return (ctx.clone(), tid.to_string());
    }

    let tid = new_transaction_id();
    warn!(
        transaction_id = %tid,
        "Transaction ID missing while augmenting annotations with concept data: generated a new transaction ID"
    );
    (ctx.clone().with_transaction_id(tid.clone()), tid)
}

#[async_trait]
impl Augmenter for ConceptAugmenter {
    async fn augment_annotations(
        &self,
        ctx: &RequestContext,
        annotations: Vec<Annotation>,
    ) -> Result<Vec<Annotation>, AugmentError> {
        let (ctx, tid) = ensure_transaction_id(ctx);

        let candidates = dedup_by_key(
            annotations
                .into_iter()
                .filter(|annotation| is_valid_pac_predicate(&annotation.predicate)),
        );

        let uuids: BTreeSet<String> = candidates
            .iter()
            .map(|annotation| extract_uuid(&annotation.concept_id))
            .filter(|uuid| !uuid.is_empty())
            .map(str::to_string)
            .collect();

        let concepts = if uuids.is_empty() {
            HashMap::new()
        } else {
            self.concept_read
                .get_concepts_by_ids(&ctx, &uuids)
                .await
                .map_err(|e| {
                    error!(
                        transaction_id = %tid,
                        error = %e,
                        "Error in augmenting annotations with concept data"
                    );
                    AugmentError::from(e)
                })?
        };

        let mut augmented = Vec::with_capacity(candidates.len());
        for mut annotation in candidates {
            let uuid = extract_uuid(&annotation.concept_id);
            let resolved = if uuid.is_empty() {
                None
            } else {
                concepts.get(uuid)
            };

            // Two requested concepts merged into one yield two annotations with
            // the same key; the output is not deduplicated again.
            match resolved {
                Some(concept) => {
                    annotation.concept_id = concept.id.clone();
                    annotation.api_url = concept.api_url.clone();
                    annotation.pref_label = concept.pref_label.clone();
                    annotation.concept_type = concept.primary_type().to_string();
                    annotation.is_ft_author = concept.is_ft_author;
                    augmented.push(annotation);
                }
                None => {
                    warn!(
                        transaction_id = %tid,
                        concept_id = %annotation.concept_id,
                        "Concept data not found, annotation dropped"
                    );
                }
            }
        }

        info!(
            transaction_id = %tid,
            count = augmented.len(),
            "Annotations augmented with concept data"
        );
        Ok(augmented)
    }
}
