use crate::types::Conversation;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory store of pending conversations, shared across handlers.
///
/// The only cross-session mutable state in the service. Handlers receive a
/// cloned handle through `AppState` rather than a global.
#[derive(Clone, Default)]
pub struct ConversationStore {
    inner: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new pending conversation and return its fresh id.
    pub async fn create(&self, message: String, max_tokens: Option<u32>) -> String {
        let id = Uuid::now_v7().to_string();
        let conversation = Conversation {
            id: id.clone(),
            message,
            max_tokens,
            created_at: Utc::now(),
        };
        self.inner.write().await.insert(id.clone(), conversation);
        id
    }

    /// Remove and return the conversation in one step. At most one caller
    /// wins; everyone else sees `None`, so a stream id can never be served
    /// by two concurrent relay sessions.
    pub async fn take(&self, id: &str) -> Option<Conversation> {
        self.inner.write().await.remove(id)
    }

    /// Idempotent removal, used for explicit cancellation.
    pub async fn delete(&self, id: &str) {
        self.inner.write().await.remove(id);
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
