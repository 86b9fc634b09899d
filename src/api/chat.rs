//! Chat API endpoint
//!
//! Handles the chat-turn request: validates the body, then hands off to the
//! orchestrator which persists the exchange.

use crate::error::AppError;
use crate::orchestrator::ChatTurn;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Message content; required by the wire contract, optional here so a
    /// missing field yields a 400 instead of a body-rejection status
    pub content: Option<String>,
    /// Accepted for wire compatibility; the persisted role is always "user"
    #[serde(default)]
    #[allow(dead_code)]
    pub role: Option<String>,
}

/// Query parameters for a chat turn
#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    /// Persona mode; defaults to "chat"
    pub mode: Option<String>,
}

/// POST /api/chat/:conversation_id - Run one chat turn
///
/// Returns the persisted user message and assistant reply. 400 on an invalid
/// body (nothing stored), 500 if the provider call fails (the user message
/// stays recorded).
pub async fn chat_turn(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
    Query(query): Query<ChatQuery>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatTurn>, AppError> {
    let content = request
        .content
        .ok_or_else(|| AppError::InvalidInput("Invalid message format".to_string()))?;
    let mode = query.mode.unwrap_or_else(|| "chat".to_string());

    let turn = state
        .orchestrator
        .handle_turn(&conversation_id, &mode, &content)
        .await?;

    Ok(Json(turn))
}
