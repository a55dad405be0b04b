//! The SSE relay core
//!
//! Bridges a reply source (canned text or the upstream model stream) to a
//! framed SSE event sequence: one `system` event first, chunk/progress
//! events in arrival order, exactly one terminal `done`/`error` event last.

pub mod session;

pub use session::RelaySession;

use crate::config::Config;
use crate::services::reply::{canned, ModelUpstream};
use crate::types::{Conversation, StreamEvent};
use axum::response::sse::Event;
use futures::{Stream, StreamExt};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

/// Turn a consumed conversation into an SSE event stream.
///
/// Dropping the returned stream (client disconnect) cancels the relay at its
/// next suspension point and aborts any in-flight upstream request; the
/// conversation record was already removed when the caller took it.
pub fn relay_stream(
    config: Arc<Config>,
    conversation: Conversation,
) -> impl Stream<Item = Result<Event, Infallible>> {
    async_stream::stream! {
        tracing::info!("relay started for conversation {}", conversation.id);
        yield Ok::<Event, Infallible>(StreamEvent::system_now().into_sse());

        let max_tokens = conversation.max_tokens.unwrap_or(config.default_max_tokens);
        let mut use_canned = !config.upstream_enabled;
        let mut terminal = false;

        if config.upstream_enabled {
            let upstream = ModelUpstream::new(
                config.upstream_base_url.clone(),
                config.upstream_model.clone(),
            );
            match upstream.stream(&conversation.message, max_tokens).await {
                Ok(mut chunks) => {
                    let mut session = RelaySession::new(config.chars_per_token, max_tokens);
                    loop {
                        match chunks.next().await {
                            Some(Ok(text)) => {
                                let progress = session.record(&text);
                                yield Ok(StreamEvent::chunk(text).into_sse());
                                yield Ok(StreamEvent::Progress(progress).into_sse());
                            }
                            Some(Err(err)) => {
                                tracing::warn!("upstream failed mid-relay: {err}");
                                if config.fallback_enabled {
                                    use_canned = true;
                                } else {
                                    yield Ok(StreamEvent::error(err.to_string()).into_sse());
                                    terminal = true;
                                }
                                break;
                            }
                            None => {
                                yield Ok(StreamEvent::done().into_sse());
                                terminal = true;
                                break;
                            }
                        }
                    }
                }
                Err(err) => {
                    tracing::warn!("upstream unavailable: {err}");
                    if config.fallback_enabled {
                        use_canned = true;
                    } else {
                        yield Ok(StreamEvent::error(err.to_string()).into_sse());
                        terminal = true;
                    }
                }
            }
        }

        if use_canned && !terminal {
            let reply = canned::craft_reply(&conversation.message);
            let delay = Duration::from_millis(config.chunk_delay_ms);
            for piece in canned::split_chunks(&reply) {
                yield Ok(StreamEvent::chunk(piece).into_sse());
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
            yield Ok(StreamEvent::done().into_sse());
        }

        tracing::debug!("relay finished for conversation {}", conversation.id);
    }
}
