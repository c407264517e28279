//! draft-annotations-api library interface
//!
//! Reads and writes draft content annotations. Published annotations are
//! pulled from UPP, translated to the canonical predicate vocabulary,
//! canonicalized and augmented with concept data before being served.

pub mod annotations;
pub mod api;
pub mod concept;
pub mod config;
pub mod error;
pub mod mapper;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use annotations::{Augmenter, Canonicalizer, ConceptAugmenter};
use axum::{middleware, Router};
use chrono::{DateTime, Utc};
use draft_common::RequestContext;
use services::{AnnotationsRw, ConceptReadApi, UppAnnotationsApi};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Draft annotations store
    pub annotations_rw: Arc<dyn AnnotationsRw>,
    /// Published annotations source
    pub upp_annotations: Arc<dyn UppAnnotationsApi>,
    /// Concept lookup, also probed by the health checks
    pub concept_read: Arc<dyn ConceptReadApi>,
    pub canonicalizer: Arc<Canonicalizer>,
    pub augmenter: Arc<dyn Augmenter>,
    /// Deadline applied to every request's outbound calls
    pub request_timeout: Duration,
    /// Cancelled on shutdown; every request context holds a child token
    pub shutdown: CancellationToken,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        annotations_rw: Arc<dyn AnnotationsRw>,
        upp_annotations: Arc<dyn UppAnnotationsApi>,
        concept_read: Arc<dyn ConceptReadApi>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            annotations_rw,
            upp_annotations,
            augmenter: Arc::new(ConceptAugmenter::new(concept_read.clone())),
            concept_read,
            canonicalizer: Arc::new(Canonicalizer::new()),
            request_timeout,
            shutdown: CancellationToken::new(),
            startup_time: Utc::now(),
        }
    }

    /// Context for one inbound request
    pub fn request_context(&self, transaction_id: &str) -> RequestContext {
        RequestContext::new()
            .with_transaction_id(transaction_id)
            .with_timeout(self.request_timeout)
            .with_cancellation(self.shutdown.child_token())
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::annotations_routes())
        .merge(api::health_routes())
        .layer(middleware::from_fn(api::transaction_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
