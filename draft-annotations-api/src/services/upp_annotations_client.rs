//! UPP public annotations client
//!
//! Fetches the published annotations of a piece of content. The raw status
//! and body are handed back to the caller, which decides how 404/400 and
//! other non-200 answers surface.

use super::{build_http_client, with_request_headers, SYNTHETIC_CONTENT_UUID};
use async_trait::async_trait;
use draft_common::transaction::Interrupted;
use draft_common::RequestContext;
use std::time::Duration;
use thiserror::Error;

/// Placeholder substituted with the content UUID in the endpoint template
pub const UUID_PLACEHOLDER: &str = "{uuid}";

/// UPP client errors
#[derive(Debug, Error)]
pub enum UppError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("GTG returned a non-200 HTTP status [{0}]: {1}")]
    GtgFailed(u16, String),

    #[error("UPP call interrupted: {0}")]
    Interrupted(#[from] Interrupted),
}

/// Raw UPP answer
#[derive(Debug, Clone, PartialEq)]
pub struct UppResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Source of published (upstream ontology) annotations
#[async_trait]
pub trait UppAnnotationsApi: Send + Sync {
    async fn get(&self, ctx: &RequestContext, content_uuid: &str)
        -> Result<UppResponse, UppError>;

    fn endpoint(&self) -> &str;

    async fn gtg(&self) -> Result<(), UppError>;
}

/// HTTP client for the UPP public annotations API
pub struct UppAnnotationsClient {
    http_client: reqwest::Client,
    endpoint_template: String,
    api_key: Option<String>,
}

impl UppAnnotationsClient {
    pub fn new(
        endpoint_template: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, UppError> {
        let http_client =
            build_http_client(timeout).map_err(|e| UppError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint_template: endpoint_template.into(),
            api_key,
        })
    }

    fn url_for(&self, content_uuid: &str) -> String {
        self.endpoint_template.replace(UUID_PLACEHOLDER, content_uuid)
    }

    async fn fetch(&self, ctx: &RequestContext, url: &str) -> Result<UppResponse, UppError> {
        let request = self.http_client.get(url);
        let response = with_request_headers(request, ctx, self.api_key.as_deref())
            .send()
            .await
            .map_err(|e| UppError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| UppError::NetworkError(e.to_string()))?;

        Ok(UppResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl UppAnnotationsApi for UppAnnotationsClient {
    async fn get(
        &self,
        ctx: &RequestContext,
        content_uuid: &str,
    ) -> Result<UppResponse, UppError> {
        let url = self.url_for(content_uuid);
        tracing::info!(
            transaction_id = ctx.transaction_id().unwrap_or("not_found"),
            uuid = %content_uuid,
            url = %url,
            "Calling UPP Public Annotations API"
        );

        let response = ctx.run(self.fetch(ctx, &url)).await??;
        Ok(response)
    }

    fn endpoint(&self) -> &str {
        &self.endpoint_template
    }

    async fn gtg(&self) -> Result<(), UppError> {
        let response = self
            .fetch(&RequestContext::new(), &self.url_for(SYNTHETIC_CONTENT_UUID))
            .await?;

        if response.status != 200 {
            return Err(UppError::GtgFailed(
                response.status,
                String::from_utf8_lossy(&response.body).into_owned(),
            ));
        }
        Ok(())
    }
}
