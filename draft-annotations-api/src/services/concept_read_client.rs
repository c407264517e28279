//! Concept read API client
//!
//! Resolves a batch of concept UUIDs in a single request:
//! `GET <endpoint>?ids=<uuid>&ids=<uuid>...` answering
//! `{"concepts": {"<requested uuid>": {<concept>}, ...}}`.
//! Requested UUIDs missing from the answer are unresolved, not an error.

use super::{build_http_client, with_request_headers, SYNTHETIC_CONTENT_UUID};
use crate::concept::Concept;
use async_trait::async_trait;
use draft_common::transaction::Interrupted;
use draft_common::RequestContext;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use thiserror::Error;

/// Concept read client errors
#[derive(Debug, Error)]
pub enum ConceptError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Concept lookup interrupted: {0}")]
    Interrupted(#[from] Interrupted),
}

/// Batched concept resolution
#[async_trait]
pub trait ConceptReadApi: Send + Sync {
    /// Resolve `uuids`; the result is keyed by requested UUID
    async fn get_concepts_by_ids(
        &self,
        ctx: &RequestContext,
        uuids: &BTreeSet<String>,
    ) -> Result<HashMap<String, Concept>, ConceptError>;

    fn endpoint(&self) -> &str;

    async fn gtg(&self) -> Result<(), ConceptError>;
}

#[derive(Debug, Deserialize)]
struct ConceptsResponse {
    #[serde(default)]
    concepts: HashMap<String, Concept>,
}

/// HTTP client for the concept read API
pub struct ConceptReadClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ConceptReadClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ConceptError> {
        let http_client =
            build_http_client(timeout).map_err(|e| ConceptError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    async fn fetch(
        &self,
        ctx: &RequestContext,
        uuids: &BTreeSet<String>,
    ) -> Result<HashMap<String, Concept>, ConceptError> {
        let query: Vec<(&str, &str)> = uuids.iter().map(|uuid| ("ids", uuid.as_str())).collect();

        let request = self.http_client.get(&self.endpoint).query(&query);
        let response = with_request_headers(request, ctx, self.api_key.as_deref())
            .send()
            .await
            .map_err(|e| ConceptError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ConceptError::ApiError(status.as_u16(), error_text));
        }

        let body: ConceptsResponse = response
            .json()
            .await
            .map_err(|e| ConceptError::ParseError(e.to_string()))?;

        Ok(body.concepts)
    }
}

#[async_trait]
impl ConceptReadApi for ConceptReadClient {
    async fn get_concepts_by_ids(
        &self,
        ctx: &RequestContext,
        uuids: &BTreeSet<String>,
    ) -> Result<HashMap<String, Concept>, ConceptError> {
        tracing::debug!(
            transaction_id = ctx.transaction_id().unwrap_or_default(),
            url = %self.endpoint,
            count = uuids.len(),
            "Querying concept read API"
        );

        let concepts = ctx.run(self.fetch(ctx, uuids)).await??;

        tracing::debug!(
            transaction_id = ctx.transaction_id().unwrap_or_default(),
            requested = uuids.len(),
            resolved = concepts.len(),
            "Retrieved concepts"
        );

        Ok(concepts)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn gtg(&self) -> Result<(), ConceptError> {
        let sample_ids: BTreeSet<String> = [SYNTHETIC_CONTENT_UUID.to_string()].into_iter().collect();
        self.fetch(&RequestContext::new(), &sample_ids).await.map(|_| ())
    }
}
