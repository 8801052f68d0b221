//! Signaling event ingress

use super::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode};

/// Accept one signaling event. The body is read as raw bytes whatever its
/// content type, and the caller always gets `200 OK`; handling failures are
/// only logged.
pub async fn rtc_event(State(state): State<AppState>, body: Bytes) -> StatusCode {
    state.dispatcher.dispatch_bytes(&body).await;
    StatusCode::OK
}
