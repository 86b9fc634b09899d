//! Chat turn orchestration
//!
//! Turns one inbound user message into a persisted exchange with the
//! completion provider: load history, assemble the persona prompt, persist
//! the user message, call the provider, persist the reply.

use crate::error::AppError;
use crate::persona;
use crate::provider::{ChatMessage, CompletionClient};
use crate::store::{MemStore, Message, MessageRole, NewMessage};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Reply persisted when the provider returns an empty body
pub const FALLBACK_REPLY: &str =
    "I apologize, but I couldn't generate a response. Please try again.";

/// The two messages persisted by one chat turn
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    /// The user's message as stored
    pub user_message: Message,
    /// The assistant's reply as stored
    pub ai_message: Message,
}

/// Assemble the provider prompt for a turn
///
/// Order is strictly: persona system entry, then history in ascending
/// timestamp order mapped role-for-role, then the new user message.
pub fn build_prompt(mode: &str, history: &[Message], content: &str) -> Vec<ChatMessage> {
    let mut prompt = Vec::with_capacity(history.len() + 2);
    prompt.push(ChatMessage {
        role: MessageRole::System,
        content: persona::persona_for(mode).to_string(),
    });
    for message in history {
        prompt.push(ChatMessage {
            role: message.role,
            content: message.content.clone(),
        });
    }
    prompt.push(ChatMessage {
        role: MessageRole::User,
        content: content.to_string(),
    });
    prompt
}

/// Orchestrates chat turns against the store and the completion provider
///
/// Holds only request-scoped data per call; the store remains the sole owner
/// of all persisted entities.
pub struct Orchestrator {
    store: Arc<MemStore>,
    completions: Arc<CompletionClient>,
}

impl Orchestrator {
    /// Create an orchestrator over the given store and provider client
    pub fn new(store: Arc<MemStore>, completions: Arc<CompletionClient>) -> Self {
        Self { store, completions }
    }

    /// Run one chat turn for a conversation
    ///
    /// The user message is persisted before the provider call, so it remains
    /// recorded even when the call fails; in that case no assistant message is
    /// written and `ProviderFailure` is returned. An unknown conversation id
    /// simply starts from empty history.
    ///
    /// # Errors
    /// * `AppError::InvalidInput` if `content` is empty or whitespace-only
    ///   (no store mutation, no provider call)
    /// * `AppError::ProviderFailure` if the completion call fails
    pub async fn handle_turn(
        &self,
        conversation_id: &str,
        mode: &str,
        content: &str,
    ) -> Result<ChatTurn, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Message content cannot be empty".to_string(),
            ));
        }

        let history = self.store.get_messages(conversation_id).await;
        let prompt = build_prompt(mode, &history, content);

        info!(
            conversation_id = %conversation_id,
            mode = %mode,
            history_len = history.len(),
            "Handling chat turn"
        );

        // Recorded before the provider call: a failed call leaves the user
        // turn in place with no reply.
        let user_message = self
            .store
            .create_message(NewMessage {
                conversation_id: conversation_id.to_string(),
                role: MessageRole::User,
                content: content.to_string(),
            })
            .await;

        let reply = self.completions.complete(&prompt).await?;
        let reply = if reply.is_empty() {
            FALLBACK_REPLY.to_string()
        } else {
            reply
        };

        let ai_message = self
            .store
            .create_message(NewMessage {
                conversation_id: conversation_id.to_string(),
                role: MessageRole::Assistant,
                content: reply,
            })
            .await;

        Ok(ChatTurn {
            user_message,
            ai_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::store::NewConversation;
    use mockito::Server;
    use serial_test::serial;

    fn orchestrator_for(base_url: &str) -> (Arc<MemStore>, Orchestrator) {
        let store = Arc::new(MemStore::new());
        let completions = Arc::new(CompletionClient::new(&ProviderConfig {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            model: "test-model".to_string(),
        }));
        (store.clone(), Orchestrator::new(store, completions))
    }

    fn reply_body(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[test]
    fn prompt_is_system_then_history_then_new_message() {
        let history = vec![
            Message {
                id: "m1".to_string(),
                conversation_id: "c1".to_string(),
                role: MessageRole::User,
                content: "hi".to_string(),
                timestamp: chrono::Utc::now(),
            },
            Message {
                id: "m2".to_string(),
                conversation_id: "c1".to_string(),
                role: MessageRole::Assistant,
                content: "hey".to_string(),
                timestamp: chrono::Utc::now(),
            },
        ];

        let prompt = build_prompt("chat", &history, "how are you");

        assert_eq!(prompt.len(), 4);
        assert_eq!(prompt[0].role, MessageRole::System);
        assert_eq!(prompt[0].content, persona::persona_for("chat"));
        assert_eq!(prompt[1].role, MessageRole::User);
        assert_eq!(prompt[1].content, "hi");
        assert_eq!(prompt[2].role, MessageRole::Assistant);
        assert_eq!(prompt[2].content, "hey");
        assert_eq!(prompt[3].role, MessageRole::User);
        assert_eq!(prompt[3].content, "how are you");
    }

    #[tokio::test]
    #[serial]
    async fn turn_persists_user_and_assistant_messages() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(reply_body("hey bestie"))
            .create_async()
            .await;

        let (store, orchestrator) = orchestrator_for(&server.url());
        let conversation = store
            .create_conversation(NewConversation {
                mode: "chat".to_string(),
                title: None,
            })
            .await;

        let turn = orchestrator
            .handle_turn(&conversation.id, "chat", "hello")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(turn.user_message.role, MessageRole::User);
        assert_eq!(turn.user_message.content, "hello");
        assert_eq!(turn.ai_message.role, MessageRole::Assistant);
        assert_eq!(turn.ai_message.content, "hey bestie");

        let messages = store.get_messages(&conversation.id).await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, turn.user_message.id);
        assert_eq!(messages[1].id, turn.ai_message.id);
    }

    #[tokio::test]
    #[serial]
    async fn provider_failure_keeps_user_message_only() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body(r#"{"error": "upstream unavailable"}"#)
            .create_async()
            .await;

        let (store, orchestrator) = orchestrator_for(&server.url());
        let result = orchestrator.handle_turn("c1", "chat", "hello").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(AppError::ProviderFailure(_))));

        let messages = store.get_messages("c1").await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "hello");
    }

    #[tokio::test]
    #[serial]
    async fn empty_provider_reply_falls_back_to_apology() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(reply_body(""))
            .create_async()
            .await;

        let (store, orchestrator) = orchestrator_for(&server.url());
        let turn = orchestrator.handle_turn("c1", "chat", "hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(turn.ai_message.content, FALLBACK_REPLY);
        assert_eq!(store.get_messages("c1").await.len(), 2);
    }

    #[tokio::test]
    async fn empty_content_is_rejected_without_side_effects() {
        // Unreachable base URL: a provider call here would fail the test
        // through the store assertions below.
        let (store, orchestrator) = orchestrator_for("http://127.0.0.1:1");

        let result = orchestrator.handle_turn("c1", "chat", "   ").await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert!(store.get_messages("c1").await.is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn history_is_sent_to_the_provider_in_order() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "messages": [
                    {"role": "system", "content": persona::persona_for("chat")},
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hey"},
                    {"role": "user", "content": "how are you"},
                ]
            })))
            .with_status(200)
            .with_body(reply_body("doing great"))
            .create_async()
            .await;

        let (store, orchestrator) = orchestrator_for(&server.url());
        store
            .create_message(NewMessage {
                conversation_id: "c1".to_string(),
                role: MessageRole::User,
                content: "hi".to_string(),
            })
            .await;
        store
            .create_message(NewMessage {
                conversation_id: "c1".to_string(),
                role: MessageRole::Assistant,
                content: "hey".to_string(),
            })
            .await;

        let turn = orchestrator
            .handle_turn("c1", "chat", "how are you")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(turn.ai_message.content, "doing great");
    }
}
