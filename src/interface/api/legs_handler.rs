//! Leg API handlers

use super::error::ApiError;
use super::state::AppState;
use crate::application::{Acknowledgement, ConversationLegsView};
use crate::domain::shared::{ConversationId, LegId};
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

/// Hang up a leg
pub async fn hangup_leg(
    State(state): State<AppState>,
    Path(leg_id): Path<String>,
) -> Result<Json<Acknowledgement>, ApiError> {
    info!("API: Hanging up leg {}", leg_id);

    let ack = state.control.hangup_leg(&LegId::new(leg_id)).await?;
    Ok(Json(ack))
}

/// Raw leg map of a conversation
pub async fn list_conversation_legs(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Json<ConversationLegsView>, ApiError> {
    info!("API: Listing legs of conversation {}", conversation_id);

    let view = state
        .control
        .list_conversation_legs(&ConversationId::new(conversation_id))
        .await?;
    Ok(Json(view))
}
