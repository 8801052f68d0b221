//! Mapping of control failures onto HTTP responses

use crate::domain::shared::DomainError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

pub const UNKNOWN_ERROR_CODE: &str = "unknown:error";

/// A failed control operation. A rejection by the conversation service is
/// forwarded with its own status and body; anything else becomes a 500.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("API: Request failed: {}", self.0);

        match self.0.remote_response() {
            Some((status, body)) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(body.clone())).into_response()
            }
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "code": UNKNOWN_ERROR_CODE,
                    "msg": self.0.to_string(),
                })),
            )
                .into_response(),
        }
    }
}
