//! In-memory store
//!
//! Sole source of truth for users, conversations and messages. Nothing is
//! persisted across restarts. Each collection sits behind its own lock so the
//! store is safe under axum's multi-threaded runtime; lookups that miss return
//! `None`/empty rather than erroring, and deletes are idempotent.

use crate::store::models::{
    Conversation, Message, NewConversation, NewMessage, NewUser, User,
};
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Process-wide in-memory repository for chat entities
///
/// Constructed once at startup and shared by handle; identifiers are generated
/// here and never supplied by clients.
#[derive(Debug, Default)]
pub struct MemStore {
    users: RwLock<HashMap<String, User>>,
    conversations: RwLock<HashMap<String, Conversation>>,
    // Vec keeps insertion order, which is the tie-break for equal timestamps
    messages: RwLock<Vec<Message>>,
}

impl MemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user with a generated id
    pub async fn create_user(&self, new_user: NewUser) -> User {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: new_user.username,
            password: new_user.password,
        };
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        debug!(user_id = %user.id, "Created user");
        user
    }

    /// Get a user by id
    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    /// Get a user by username (linear scan over current users)
    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    /// Create a conversation with a generated id and `created_at` stamped now
    pub async fn create_conversation(&self, new_conversation: NewConversation) -> Conversation {
        let conversation = Conversation {
            id: Uuid::new_v4().to_string(),
            mode: new_conversation.mode,
            title: new_conversation.title,
            created_at: Utc::now(),
        };
        self.conversations
            .write()
            .await
            .insert(conversation.id.clone(), conversation.clone());
        debug!(conversation_id = %conversation.id, "Created conversation");
        conversation
    }

    /// Get a conversation by id
    pub async fn get_conversation(&self, id: &str) -> Option<Conversation> {
        self.conversations.read().await.get(id).cloned()
    }

    /// Get all conversations, newest `created_at` first
    pub async fn get_conversations(&self) -> Vec<Conversation> {
        let mut conversations: Vec<Conversation> =
            self.conversations.read().await.values().cloned().collect();
        conversations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        conversations
    }

    /// Create a message with a generated id and `timestamp` stamped now
    ///
    /// The `conversation_id` is stored as given; no existence check is made
    /// against the conversations collection, matching the permissive contract
    /// of the rest of the store.
    pub async fn create_message(&self, new_message: NewMessage) -> Message {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            conversation_id: new_message.conversation_id,
            role: new_message.role,
            content: new_message.content,
            timestamp: Utc::now(),
        };
        self.messages.write().await.push(message.clone());
        debug!(
            message_id = %message.id,
            conversation_id = %message.conversation_id,
            "Created message"
        );
        message
    }

    /// Get all messages for a conversation, ordered by timestamp ascending
    ///
    /// Equal timestamps keep their insertion order. An unknown conversation id
    /// yields an empty list.
    pub async fn get_messages(&self, conversation_id: &str) -> Vec<Message> {
        let mut messages: Vec<Message> = self
            .messages
            .read()
            .await
            .iter()
            .filter(|message| message.conversation_id == conversation_id)
            .cloned()
            .collect();
        // Stable sort preserves insertion order for equal timestamps
        messages.sort_by_key(|message| message.timestamp);
        messages
    }

    /// Delete a conversation and all messages referencing it
    ///
    /// Deleting an unknown id is a no-op.
    pub async fn delete_conversation(&self, id: &str) {
        self.messages
            .write()
            .await
            .retain(|message| message.conversation_id != id);
        if self.conversations.write().await.remove(id).is_some() {
            debug!(conversation_id = %id, "Deleted conversation");
        }
    }
}
