//! Streaming client for the upstream inference service
//!
//! Speaks the line-delimited-JSON chat contract: POST `/api/chat` with
//! `stream: true`, read one JSON object per line, stop at `done: true`.

use crate::services::reply::decoder::LineDecoder;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text deltas from the upstream, ending on completion or first error.
pub type ReplyStream = BoxStream<'static, Result<String, UpstreamError>>;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(reqwest::StatusCode),
}

pub struct ModelUpstream {
    client: Client,
    base_url: String,
    model: String,
}

impl ModelUpstream {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Open a streaming chat request for `message` capped at `max_tokens`.
    pub async fn stream(&self, message: &str, max_tokens: u32) -> Result<ReplyStream, UpstreamError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: message.to_string(),
            }],
            stream: true,
            options: GenerationOptions {
                num_predict: max_tokens,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let mut bytes = response.bytes_stream();
        let stream = async_stream::stream! {
            let mut decoder = LineDecoder::new();
            let mut finished = false;

            while let Some(next) = bytes.next().await {
                let data = match next {
                    Ok(data) => data,
                    Err(err) => {
                        yield Err(UpstreamError::Request(err));
                        finished = true;
                        break;
                    }
                };
                for line in decoder.feed(&data) {
                    if let Some(parsed) = parse_line(&line) {
                        if let Some(text) = parsed.content {
                            yield Ok(text);
                        }
                        if parsed.done {
                            finished = true;
                            break;
                        }
                    }
                }
                if finished {
                    break;
                }
            }

            // Upstream closed without a done marker; drain any partial line.
            if !finished {
                if let Some(line) = decoder.finish() {
                    if let Some(parsed) = parse_line(&line) {
                        if let Some(text) = parsed.content {
                            yield Ok(text);
                        }
                    }
                }
            }
        };

        Ok(stream.boxed())
    }
}

struct ParsedLine {
    content: Option<String>,
    done: bool,
}

/// Parse one NDJSON line. Malformed lines are logged and skipped rather
/// than aborting the session.
fn parse_line(line: &str) -> Option<ParsedLine> {
    if line.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<ChatChunk>(line) {
        Ok(chunk) => Some(ParsedLine {
            content: chunk
                .message
                .map(|m| m.content)
                .filter(|content| !content.is_empty()),
            done: chunk.done,
        }),
        Err(err) => {
            tracing::warn!("skipping malformed upstream line: {err}");
            None
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    options: GenerationOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct GenerationOptions {
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct ChatChunk {
    message: Option<ChunkMessage>,
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct ChunkMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn relays_content_and_skips_malformed_lines() {
        let server = MockServer::start().await;
        let body = concat!(
            "{\"message\":{\"content\":\"Hel\"},\"done\":false}\n",
            "definitely not json\n",
            "{\"message\":{\"content\":\"lo\"},\"done\":false}\n",
            "{\"message\":{\"content\":\"\"},\"done\":true}\n",
        );
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
            .mount(&server)
            .await;

        let upstream = ModelUpstream::new(server.uri(), "test-model");
        let mut stream = upstream.stream("hi", 32).await.unwrap();

        let mut chunks = Vec::new();
        while let Some(item) = stream.next().await {
            chunks.push(item.unwrap());
        }
        assert_eq!(chunks, vec!["Hel", "lo"]);
    }

    #[tokio::test]
    async fn request_carries_model_budget_and_stream_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "model": "test-model",
                "stream": true,
                "options": { "num_predict": 32 },
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("{\"done\":true}\n", "application/x-ndjson"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let upstream = ModelUpstream::new(server.uri(), "test-model");
        let mut stream = upstream.stream("hi", 32).await.unwrap();
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn missing_done_marker_still_terminates() {
        let server = MockServer::start().await;
        // No done line, and the last line lacks its newline.
        let body = "{\"message\":{\"content\":\"partial\"},\"done\":false}";
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
            .mount(&server)
            .await;

        let upstream = ModelUpstream::new(server.uri(), "test-model");
        let mut stream = upstream.stream("hi", 32).await.unwrap();
        assert_eq!(stream.next().await.unwrap().unwrap(), "partial");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let upstream = ModelUpstream::new(server.uri(), "test-model");
        let err = match upstream.stream("hi", 32).await {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert!(matches!(err, UpstreamError::Status(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error() {
        // Port 9 (discard) refuses connections immediately.
        let upstream = ModelUpstream::new("http://127.0.0.1:9", "test-model");
        assert!(upstream.stream("hi", 32).await.is_err());
    }
}
