//! The conversation streaming endpoint

use crate::services::relay::relay_stream;
use crate::state::AppState;
use crate::types::AppError;
use axum::{
    extract::{Path, State},
    response::sse::{KeepAlive, Sse},
    response::IntoResponse,
};
use std::time::Duration;

/// Consume the pending conversation and relay its reply as SSE.
///
/// Unknown ids fail with a plain 404 before any stream bytes are written;
/// `take` also guarantees a second request for the same id gets the 404.
pub async fn stream_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let conversation = state
        .conversations
        .take(&id)
        .await
        .ok_or(AppError::UnknownStream)?;
    tracing::info!("📡 SSE connection established for conversation {}", id);

    let sse = Sse::new(relay_stream(state.config.clone(), conversation)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("keep-alive"),
    );

    // Nginx-style proxies buffer SSE bodies unless told otherwise.
    Ok(([("x-accel-buffering", "no")], sse))
}
