//! Outbound service clients
//!
//! Each dependency is reached through a trait so handlers and the augmenter
//! can be exercised against in-process fakes:
//! - [`ConceptReadApi`]: batched concept lookup
//! - [`UppAnnotationsApi`]: published annotations from UPP
//! - [`AnnotationsRw`]: draft annotations store with hash preconditions

pub mod annotations_rw_client;
pub mod concept_read_client;
pub mod upp_annotations_client;

pub use annotations_rw_client::{
    AnnotationsRw, AnnotationsRwClient, RwError, StoredAnnotations, DOCUMENT_HASH_HEADER,
    PREVIOUS_DOCUMENT_HASH_HEADER,
};
pub use concept_read_client::{ConceptError, ConceptReadApi, ConceptReadClient};
pub use upp_annotations_client::{UppAnnotationsApi, UppAnnotationsClient, UppError, UppResponse};

use draft_common::transaction::TRANSACTION_ID_HEADER;
use draft_common::RequestContext;
use std::time::Duration;

const USER_AGENT: &str = concat!("draft-annotations-api/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "X-Api-Key";

/// Content UUID used by good-to-go probes against content-keyed endpoints
pub const SYNTHETIC_CONTENT_UUID: &str = "4f2f97ea-b8ec-11e4-b8e6-00144feab7de";

/// Shared reqwest client configuration for all outbound dependencies
pub(crate) fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Attach the transaction id and, when configured, the API key
pub(crate) fn with_request_headers(
    request: reqwest::RequestBuilder,
    ctx: &RequestContext,
    api_key: Option<&str>,
) -> reqwest::RequestBuilder {
    let request = match ctx.transaction_id() {
        Some(tid) => request.header(TRANSACTION_ID_HEADER, tid),
        None => request,
    };
    match api_key {
        Some(key) => request.header(API_KEY_HEADER, key),
        None => request,
    }
}
