//! Conversation state storage.
//!
//! The dialogue layer owns a `SessionStore` and passes it to request
//! handlers; nothing here is global.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::slots::PartialFacts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Everything remembered about one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub facts: PartialFacts,
    pub history: Vec<ChatTurn>,
    /// Last `(lat, lon)` the visitor shared.
    pub last_location: Option<(f64, f64)>,
}

impl ConversationState {
    pub fn push_turn(&mut self, role: ChatRole, content: impl Into<String>) {
        self.history.push(ChatTurn {
            role,
            content: content.into(),
        });
    }
}

pub trait SessionStore {
    fn get(&self, session_id: &str) -> Option<ConversationState>;
    fn put(&self, session_id: &str, state: ConversationState);
    fn remove(&self, session_id: &str) -> Option<ConversationState>;
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, ConversationState>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Option<ConversationState> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session_id)
            .cloned()
    }

    fn put(&self, session_id: &str, state: ConversationState) {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session_id.to_string(), state);
    }

    fn remove(&self, session_id: &str) -> Option<ConversationState> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(session_id)
    }
}
