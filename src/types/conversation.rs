//! Conversation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending chat request, held in the store until a relay consumes it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub message: String,
    pub max_tokens: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    #[serde(default)]
    pub message: String,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CreateConversationResponse {
    pub id: String,
}
