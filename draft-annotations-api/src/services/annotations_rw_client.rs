//! Draft annotations read/write store client
//!
//! Documents live at `<endpoint>/drafts/content/<uuid>/annotations`. Every
//! stored version carries an opaque hash (`Document-Hash`); writes send the
//! hash they were based on (`Previous-Document-Hash`) so the store can reject
//! stale updates.

use super::{build_http_client, with_request_headers};
use crate::annotations::Annotations;
use async_trait::async_trait;
use draft_common::transaction::Interrupted;
use draft_common::RequestContext;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Response header carrying the hash of the stored document
pub const DOCUMENT_HASH_HEADER: &str = "Document-Hash";

/// Request header carrying the hash a write is based on
pub const PREVIOUS_DOCUMENT_HASH_HEADER: &str = "Previous-Document-Hash";

/// Annotations store errors
#[derive(Debug, Error)]
pub enum RwError {
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The stored document changed since the hash the write was based on
    #[error("Document hash precondition failed: {0}")]
    Conflict(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Annotations RW call interrupted: {0}")]
    Interrupted(#[from] Interrupted),
}

/// A stored annotations document and its version hash
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAnnotations {
    pub annotations: Annotations,
    pub hash: String,
}

/// Persistence of canonical annotation sets keyed by content UUID
#[async_trait]
pub trait AnnotationsRw: Send + Sync {
    /// Stored annotations, or `None` when nothing is stored for the content
    async fn read(
        &self,
        ctx: &RequestContext,
        content_uuid: &str,
    ) -> Result<Option<StoredAnnotations>, RwError>;

    /// Store `annotations` and return the new document hash
    async fn write(
        &self,
        ctx: &RequestContext,
        content_uuid: &str,
        annotations: &Annotations,
        previous_hash: Option<&str>,
    ) -> Result<String, RwError>;

    fn endpoint(&self) -> &str;

    async fn gtg(&self) -> Result<(), RwError>;
}

/// HTTP client for the draft annotations RW service
pub struct AnnotationsRwClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl AnnotationsRwClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RwError> {
        let http_client =
            build_http_client(timeout).map_err(|e| RwError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    fn document_url(&self, content_uuid: &str) -> String {
        format!("{}/drafts/content/{}/annotations", self.endpoint, content_uuid)
    }

    async fn fetch(
        &self,
        ctx: &RequestContext,
        content_uuid: &str,
    ) -> Result<Option<StoredAnnotations>, RwError> {
        let request = self.http_client.get(self.document_url(content_uuid));
        let response = with_request_headers(request, ctx, None)
            .send()
            .await
            .map_err(|e| RwError::NetworkError(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::NOT_FOUND => return Ok(None),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                return Err(RwError::ApiError(status.as_u16(), error_text));
            }
        }

        let hash = document_hash(response.headers());
        let annotations: Annotations = response
            .json()
            .await
            .map_err(|e| RwError::ParseError(e.to_string()))?;

        Ok(Some(StoredAnnotations { annotations, hash }))
    }

    async fn store(
        &self,
        ctx: &RequestContext,
        content_uuid: &str,
        annotations: &Annotations,
        previous_hash: Option<&str>,
    ) -> Result<String, RwError> {
        let mut request = self
            .http_client
            .put(self.document_url(content_uuid))
            .json(annotations);
        if let Some(hash) = previous_hash {
            request = request.header(PREVIOUS_DOCUMENT_HASH_HEADER, hash);
        }

        let response = with_request_headers(request, ctx, None)
            .send()
            .await
            .map_err(|e| RwError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::CONFLICT || status == StatusCode::PRECONDITION_FAILED {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RwError::Conflict(error_text));
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RwError::ApiError(status.as_u16(), error_text));
        }

        Ok(document_hash(response.headers()))
    }
}

fn document_hash(headers: &reqwest::header::HeaderMap) -> String {
    headers
        .get(DOCUMENT_HASH_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl AnnotationsRw for AnnotationsRwClient {
    async fn read(
        &self,
        ctx: &RequestContext,
        content_uuid: &str,
    ) -> Result<Option<StoredAnnotations>, RwError> {
        tracing::debug!(
            transaction_id = ctx.transaction_id().unwrap_or_default(),
            uuid = %content_uuid,
            "Reading draft annotations"
        );
        ctx.run(self.fetch(ctx, content_uuid)).await?
    }

    async fn write(
        &self,
        ctx: &RequestContext,
        content_uuid: &str,
        annotations: &Annotations,
        previous_hash: Option<&str>,
    ) -> Result<String, RwError> {
        tracing::debug!(
            transaction_id = ctx.transaction_id().unwrap_or_default(),
            uuid = %content_uuid,
            count = annotations.annotations.len(),
            "Writing draft annotations"
        );
        ctx.run(self.store(ctx, content_uuid, annotations, previous_hash))
            .await?
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn gtg(&self) -> Result<(), RwError> {
        let response = self
            .http_client
            .get(format!("{}/__gtg", self.endpoint))
            .send()
            .await
            .map_err(|e| RwError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(RwError::ApiError(status.as_u16(), error_text));
        }
        Ok(())
    }
}
