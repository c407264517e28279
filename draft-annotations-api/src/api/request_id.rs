//! Transaction id propagation
//!
//! Runs in front of every route: a request without `X-Request-Id` gets a
//! generated one, and the id is echoed on the response whatever its status.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use draft_common::transaction::{new_transaction_id, transaction_id_from_headers};
use tracing::warn;

/// `X-Request-Id` in the lowercase form `from_static` requires
fn transaction_id_header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

/// Ensure the request carries a transaction id and echo it on the response
pub async fn transaction_id_middleware(mut request: Request, next: Next) -> Response {
    let tid = transaction_id_from_headers(request.headers()).unwrap_or_else(new_transaction_id);

    let value = match HeaderValue::from_str(&tid) {
        Ok(value) => value,
        Err(_) => {
            warn!(transaction_id = %tid, "Transaction id is not a valid header value");
            return next.run(request).await;
        }
    };

    request.headers_mut().insert(transaction_id_header(), value.clone());
    let mut response = next.run(request).await;
    response.headers_mut().insert(transaction_id_header(), value);
    response
}
