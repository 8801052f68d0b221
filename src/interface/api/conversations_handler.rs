//! Conversation API handlers

use super::error::ApiError;
use super::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

/// Get the conversation with the given name, creating it if needed
pub async fn get_or_create_conversation(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    info!("API: Getting or creating conversation {}", name);

    let conversation = state.control.get_or_create_conversation(&name).await?;
    Ok(Json(conversation))
}
