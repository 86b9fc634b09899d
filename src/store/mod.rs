//! Store module
//!
//! Handles in-memory storage for users, chat conversations and messages.

pub mod mem;
pub mod models;

pub use mem::MemStore;
pub use models::{Conversation, Message, MessageRole, NewConversation, NewMessage, NewUser, User};
