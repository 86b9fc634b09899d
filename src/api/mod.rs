//! API module
//!
//! Contains HTTP request handlers for the chat relay endpoints.

pub mod chat;
pub mod conversations;
