//! HTTP mapping for `SysfeedError` (non-streaming responses only).
//!
//! Once a stream has started, errors are never sent in-band; the stream just
//! ends.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sysfeed_core::error::{ClientCode, SysfeedError};

/// Wrapper so the server crate can implement `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub SysfeedError);

impl From<SysfeedError> for ApiError {
    fn from(e: SysfeedError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = match code {
            ClientCode::BadRequest | ClientCode::InvalidEvent => StatusCode::BAD_REQUEST,
            ClientCode::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
            ClientCode::Unsupported => StatusCode::NOT_IMPLEMENTED,
            ClientCode::Metrics | ClientCode::Transport | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
