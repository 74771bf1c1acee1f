//! # Backend Rewrite
//!
//! Forwards every `/api/*` request to the same path on the scheduling
//! backend: method, query string, end-to-end headers and body included.
//! Status, headers and body come back untouched; the gateway does not look
//! inside them. Only a backend that cannot be reached is turned into a
//! gateway error.

use axum::{
    body::{self, Body},
    extract::{OriginalUri, State},
    http::{header, HeaderMap, HeaderName, Method, Uri},
    response::{IntoResponse, Response},
};
use kairo_core::errors::KairoError;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{middleware::error_handling::AppError, ApiState};

/// Largest request body the gateway buffers before forwarding (CSV uploads
/// included).
pub const MAX_FORWARD_BODY: usize = 16 * 1024 * 1024;

/// Backend URL for a request path, keeping its query string.
pub fn rewrite_target(backend_url: &str, uri: &Uri) -> String {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    format!("{}{}", backend_url, path_and_query)
}

/// Whether a header belongs to the end-to-end message rather than to one hop.
pub fn is_forwardable(name: &HeaderName) -> bool {
    !matches!(
        name.as_str(),
        "host"
            | "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "content-length"
    )
}

fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| is_forwardable(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

pub async fn forward(
    State(state): State<Arc<ApiState>>,
    OriginalUri(uri): OriginalUri,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, AppError> {
    let target = rewrite_target(&state.backend_url, &uri);
    debug!("Forwarding {} {} to {}", method, uri, target);

    let payload = body::to_bytes(body, MAX_FORWARD_BODY).await.map_err(|e| {
        KairoError::Validation(format!("Request body could not be read: {}", e))
    })?;

    let upstream = state
        .http
        .request(method, &target)
        .headers(forwardable_headers(&headers))
        .body(payload)
        .send()
        .await
        .map_err(|e| {
            warn!("Backend unreachable for {}: {}", target, e);
            KairoError::Unreachable(e.to_string())
        })?;

    let status = upstream.status();
    let mut response_headers = forwardable_headers(upstream.headers());
    if !response_headers.contains_key(header::CONTENT_TYPE) {
        response_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
    }

    let body = upstream
        .bytes()
        .await
        .map_err(|e| KairoError::Unreachable(e.to_string()))?;

    Ok((status, response_headers, body).into_response())
}
