//! # Error Handling Middleware
//!
//! Maps [`KairoError`] to HTTP status codes and JSON error bodies so every
//! endpoint reports failures the same way. Each error kind keeps its own
//! status: a missing student is a 404, a backend that cannot be reached or
//! that answers with something undecodable is a 502, and an upstream error
//! status is passed through as is.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kairo_core::errors::KairoError;
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use kairo_api::middleware::error_handling::AppError;
/// use kairo_core::errors::KairoError;
///
/// async fn handler(code: String) -> Result<Json<String>, AppError> {
///     if code.trim().is_empty() {
///         return Err(AppError(KairoError::Validation("Faculty code must not be empty".into())));
///     }
///     Ok(Json(code))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub KairoError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            KairoError::NotFound(_) => StatusCode::NOT_FOUND,
            KairoError::Validation(_) => StatusCode::BAD_REQUEST,
            KairoError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            KairoError::Unreachable(_) => StatusCode::BAD_GATEWAY,
            KairoError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            KairoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(kind = self.0.kind(), "Request failed: {}", self.0);
        }

        let body = Json(json!({
            "error": self.0.to_string(),
            "kind": self.0.kind(),
        }));

        (status, body).into_response()
    }
}

/// Automatic conversion from KairoError to AppError
impl From<KairoError> for AppError {
    fn from(err: KairoError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(KairoError::Internal(err))
    }
}

/// Maps a KairoError to an HTTP response
pub fn map_error(err: KairoError) -> Response {
    AppError(err).into_response()
}
