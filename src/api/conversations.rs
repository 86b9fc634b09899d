//! Conversation API endpoints
//!
//! Handles HTTP requests for conversation and message listing, creation and
//! deletion.

use crate::error::AppError;
use crate::state::AppState;
use crate::store::{Conversation, Message, NewConversation};
use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Deserialize;

/// Request to create a new conversation
///
/// `mode` is required by the wire contract; it is optional here so a missing
/// field yields a 400 instead of a body-rejection status.
#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    /// Behavior variant tag selecting the persona
    pub mode: Option<String>,
    /// Optional display title
    pub title: Option<String>,
}

/// POST /api/conversations - Create a new conversation
pub async fn create_conversation(
    State(state): State<AppState>,
    Json(request): Json<CreateConversationRequest>,
) -> Result<Json<Conversation>, AppError> {
    let mode = request
        .mode
        .filter(|mode| !mode.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("Invalid conversation format".to_string()))?;

    let conversation = state
        .store
        .create_conversation(NewConversation {
            mode,
            title: request.title,
        })
        .await;

    Ok(Json(conversation))
}

/// GET /api/conversations - List all conversations, newest first
pub async fn list_conversations(State(state): State<AppState>) -> Json<Vec<Conversation>> {
    Json(state.store.get_conversations().await)
}

/// GET /api/messages/:conversation_id - List a conversation's messages
///
/// Ascending by timestamp; an unknown conversation id yields an empty list.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Json<Vec<Message>> {
    Json(state.store.get_messages(&conversation_id).await)
}

/// DELETE /api/conversation/:conversation_id - Delete a conversation
///
/// Cascades to the conversation's messages; idempotent.
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Json<serde_json::Value> {
    state.store.delete_conversation(&conversation_id).await;
    Json(serde_json::json!({ "success": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::store::{MessageRole, NewMessage};

    fn test_state() -> AppState {
        AppState::new(&ProviderConfig {
            api_key: "test-key".to_string(),
            base_url: "http://127.0.0.1:1".to_string(),
            model: "test-model".to_string(),
        })
    }

    #[tokio::test]
    async fn create_conversation_requires_mode() {
        let state = test_state();
        let request = CreateConversationRequest {
            mode: None,
            title: Some("t".to_string()),
        };
        let result = create_conversation(State(state.clone()), Json(request)).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert!(state.store.get_conversations().await.is_empty());
    }

    #[tokio::test]
    async fn create_conversation_returns_entity() {
        let state = test_state();
        let request = CreateConversationRequest {
            mode: Some("chat".to_string()),
            title: None,
        };
        let conversation = create_conversation(State(state), Json(request))
            .await
            .unwrap()
            .0;
        assert_eq!(conversation.mode, "chat");
        assert!(conversation.title.is_none());
        assert!(!conversation.id.is_empty());
    }

    #[tokio::test]
    async fn list_conversations_empty() {
        let state = test_state();
        let conversations = list_conversations(State(state)).await.0;
        assert!(conversations.is_empty());
    }

    #[tokio::test]
    async fn get_messages_unknown_conversation_is_empty() {
        let state = test_state();
        let messages = get_messages(State(state), Path("nonexistent".to_string()))
            .await
            .0;
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn delete_conversation_reports_success_and_cascades() {
        let state = test_state();
        let conversation = state
            .store
            .create_conversation(NewConversation {
                mode: "chat".to_string(),
                title: None,
            })
            .await;
        state
            .store
            .create_message(NewMessage {
                conversation_id: conversation.id.clone(),
                role: MessageRole::User,
                content: "hi".to_string(),
            })
            .await;

        let body = delete_conversation(State(state.clone()), Path(conversation.id.clone()))
            .await
            .0;
        assert_eq!(body["success"], true);
        assert!(state.store.get_messages(&conversation.id).await.is_empty());

        // Deleting again is still a success
        let body = delete_conversation(State(state), Path(conversation.id)).await.0;
        assert_eq!(body["success"], true);
    }
}
