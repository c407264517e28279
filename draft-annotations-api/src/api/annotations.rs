//! Draft annotations endpoints
//!
//! - `GET /drafts/content/:uuid/annotations`: stored drafts, or UPP's
//!   published annotations converted to the canonical vocabulary, augmented
//!   with concept data
//! - `PUT /drafts/content/:uuid/annotations`: canonicalize and store drafts

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use draft_common::transaction::transaction_id_from_headers_or_new;
use draft_common::{uuid_utils, RequestContext};
use tracing::{error, info, warn};

use crate::annotations::{is_valid_pac_predicate, sort_canonical, Annotation, Annotations};
use crate::mapper::convert_predicates;
use crate::services::{RwError, DOCUMENT_HASH_HEADER, PREVIOUS_DOCUMENT_HASH_HEADER};
use crate::{ApiError, ApiResult, AppState};

/// GET /drafts/content/:uuid/annotations
///
/// **Response:** `{"annotations": [...]}`, with `Document-Hash` when the
/// drafts came from the store.
///
/// **Errors:**
/// - UPP 404/400: relayed verbatim
/// - UPP other non-200: 503
/// - Nothing left after predicate conversion: 404
/// - Store, UPP, conversion or concept lookup failure: 500
pub async fn read_annotations(
    State(state): State<AppState>,
    Path(content_uuid): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let tid = transaction_id_from_headers_or_new(&headers);
    let ctx = state.request_context(&tid);

    info!(transaction_id = %tid, uuid = %content_uuid, "Reading from annotations RW...");
    let stored = state
        .annotations_rw
        .read(&ctx, &content_uuid)
        .await
        .map_err(|e| {
            error!(transaction_id = %tid, uuid = %content_uuid, error = %e, "Annotations RW error");
            ApiError::Internal(format!("Annotations RW error: {}", e))
        })?;

    let (raw_annotations, hash) = match stored {
        Some(stored) => (stored.annotations.annotations, Some(stored.hash)),
        None => {
            info!(
                transaction_id = %tid,
                uuid = %content_uuid,
                "Annotations not found: retrieving annotations from UPP"
            );
            (fetch_from_upp(&state, &ctx, &tid, &content_uuid).await?, None)
        }
    };

    let canonical = state.canonicalizer.canonicalize(raw_annotations);

    info!(transaction_id = %tid, uuid = %content_uuid, "Augmenting annotations...");
    let augmented = state
        .augmenter
        .augment_annotations(&ctx, canonical)
        .await
        .map_err(|e| ApiError::Internal(format!("Annotations augmenter error: {}", e)))?;

    let mut response = Json(Annotations {
        annotations: augmented,
    })
    .into_response();
    if let Some(hash) = hash {
        set_header(&mut response, DOCUMENT_HASH_HEADER, &hash);
    }
    Ok(response)
}

/// Published annotations from UPP, converted to the canonical vocabulary
async fn fetch_from_upp(
    state: &AppState,
    ctx: &RequestContext,
    tid: &str,
    content_uuid: &str,
) -> ApiResult<Vec<Annotation>> {
    let upp_response = state
        .upp_annotations
        .get(ctx, content_uuid)
        .await
        .map_err(|e| {
            error!(transaction_id = %tid, uuid = %content_uuid, error = %e, "Error in calling UPP Public Annotations API");
            ApiError::Internal(e.to_string())
        })?;

    match upp_response.status {
        200 => {}
        404 => {
            return Err(ApiError::Upstream {
                status: StatusCode::NOT_FOUND,
                body: upp_response.body,
            })
        }
        400 => {
            return Err(ApiError::Upstream {
                status: StatusCode::BAD_REQUEST,
                body: upp_response.body,
            })
        }
        status => {
            warn!(transaction_id = %tid, uuid = %content_uuid, status, "UPP Public Annotations API unavailable");
            return Err(ApiError::ServiceUnavailable("Service unavailable".to_string()));
        }
    }

    let converted = convert_predicates(&upp_response.body).map_err(|e| {
        error!(
            transaction_id = %tid,
            uuid = %content_uuid,
            error = %e,
            "Error converting predicates from UPP Public Annotations API response"
        );
        ApiError::Internal(e.to_string())
    })?;

    let Some(converted) = converted else {
        return Err(ApiError::NotFound("No annotations can be found".to_string()));
    };

    let records: Vec<serde_json::Value> = serde_json::from_slice(&converted)
        .map_err(|e| ApiError::Internal(format!("Unable to read converted annotations: {}", e)))?;

    let mut annotations = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<Annotation>(record) {
            Ok(annotation) => annotations.push(annotation),
            Err(e) => warn!(
                transaction_id = %tid,
                uuid = %content_uuid,
                error = %e,
                "Unreadable annotation from UPP Public Annotations API, skipped"
            ),
        }
    }
    Ok(annotations)
}

/// PUT /drafts/content/:uuid/annotations
///
/// **Request:** `{"annotations": [...]}`, optional `Previous-Document-Hash`
/// **Response:** the canonical annotations as stored, with the new `Document-Hash`
///
/// **Errors:**
/// - 400: invalid content UUID, unparsable body, or a non-canonical predicate
/// - 409: the stored document changed since `Previous-Document-Hash`
/// - 500: store failure
pub async fn write_annotations(
    State(state): State<AppState>,
    Path(content_uuid): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Response> {
    let tid = transaction_id_from_headers_or_new(&headers);
    let ctx = state.request_context(&tid);

    let previous_hash = headers
        .get(PREVIOUS_DOCUMENT_HASH_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if let Err(e) = uuid_utils::parse(&content_uuid) {
        error!(transaction_id = %tid, uuid = %content_uuid, error = %e, "Invalid content UUID");
        return Err(ApiError::BadRequest(format!(
            "Invalid content UUID: {}",
            content_uuid
        )));
    }

    let mut draft: Annotations = serde_json::from_slice(&body).map_err(|e| {
        error!(transaction_id = %tid, uuid = %content_uuid, error = %e, "Unable to unmarshal annotations body");
        ApiError::BadRequest(format!("Unable to unmarshal annotations body: {}", e))
    })?;

    if let Some(invalid) = draft
        .annotations
        .iter()
        .find(|annotation| !is_valid_pac_predicate(&annotation.predicate))
    {
        return Err(ApiError::BadRequest(format!(
            "Invalid predicate: {}",
            invalid.predicate
        )));
    }

    info!(transaction_id = %tid, uuid = %content_uuid, "Canonicalizing annotations...");
    let mut canonical = state.canonicalizer.canonicalize(draft.annotations);
    sort_canonical(&mut canonical);
    draft.annotations = canonical;

    info!(transaction_id = %tid, uuid = %content_uuid, "Writing to annotations RW...");
    let new_hash = state
        .annotations_rw
        .write(&ctx, &content_uuid, &draft, previous_hash.as_deref())
        .await
        .map_err(|e| {
            error!(transaction_id = %tid, uuid = %content_uuid, error = %e, "Error in writing draft annotations");
            match e {
                RwError::Conflict(msg) => ApiError::Conflict(format!(
                    "Draft annotations were modified concurrently: {}",
                    msg
                )),
                other => ApiError::Internal(format!(
                    "Error in writing draft annotations: {}",
                    other
                )),
            }
        })?;

    let mut response = Json(draft).into_response();
    set_header(&mut response, DOCUMENT_HASH_HEADER, &new_hash);
    Ok(response)
}

fn set_header(response: &mut Response, name: &str, value: &str) {
    match (
        HeaderName::from_bytes(name.as_bytes()),
        HeaderValue::from_str(value),
    ) {
        (Ok(header_name), Ok(header_value)) => {
            response.headers_mut().insert(header_name, header_value);
        }
        _ => warn!(header = name, "Dropping unrepresentable response header"),
    }
}

/// Build draft annotations routes
pub fn annotations_routes() -> Router<AppState> {
    Router::new().route(
        "/drafts/content/:uuid/annotations",
        get(read_annotations).put(write_annotations),
    )
}
