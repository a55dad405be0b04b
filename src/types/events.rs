use axum::response::sse::Event;
use serde::{Deserialize, Serialize};

/// One event on a relay stream.
///
/// Every stream opens with exactly one `System`, carries zero or more
/// `Chunk`/`Progress` events, and closes with exactly one `Done` or `Error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StreamEvent {
    System { started_at: i64 },
    Chunk { text: String },
    Progress(ProgressSnapshot),
    Done { ok: bool },
    Error { message: String },
}

/// Progress estimate for one relay session, recomputed after each chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub tokens_emitted: u32,
    pub max_tokens: u32,
    pub tokens_per_sec: f64,
    pub eta_seconds: Option<u64>,
}

impl StreamEvent {
    pub fn system_now() -> Self {
        Self::System {
            started_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn chunk(text: impl Into<String>) -> Self {
        Self::Chunk { text: text.into() }
    }

    pub fn done() -> Self {
        Self::Done { ok: true }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// SSE event name. Chunks go out unnamed so EventSource clients receive
    /// them via `onmessage`, matching the browser side of the demo.
    pub fn event_name(&self) -> Option<&'static str> {
        match self {
            Self::System { .. } => Some("system"),
            Self::Chunk { .. } => None,
            Self::Progress(_) => Some("progress"),
            Self::Done { .. } => Some("done"),
            Self::Error { .. } => Some("error"),
        }
    }

    pub fn to_sse_data(&self) -> String {
        let data = match self {
            Self::System { started_at } => serde_json::json!({ "startedAt": started_at }),
            Self::Chunk { text } => serde_json::Value::String(text.clone()),
            Self::Progress(snapshot) => {
                serde_json::to_value(snapshot).unwrap_or(serde_json::Value::Null)
            }
            Self::Done { ok } => serde_json::json!({ "ok": ok }),
            Self::Error { message } => serde_json::json!({ "message": message }),
        };
        data.to_string()
    }

    pub fn into_sse(self) -> Event {
        let event = Event::default().data(self.to_sse_data());
        match self.event_name() {
            Some(name) => event.event(name),
            None => event,
        }
    }
}
