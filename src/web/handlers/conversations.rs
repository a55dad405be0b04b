//! Conversation submission and cancellation

use crate::state::AppState;
use crate::types::{AppError, CreateConversationRequest, CreateConversationResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

/// Accept a message and park it in the store; the client then opens
/// `GET /conversations/{id}/stream` to receive the reply.
pub async fn create_conversation(
    State(state): State<AppState>,
    Json(request): Json<CreateConversationRequest>,
) -> Result<(StatusCode, Json<CreateConversationResponse>), AppError> {
    if request.message.is_empty() {
        return Err(AppError::Validation("message is required".to_string()));
    }
    if request.max_tokens == Some(0) {
        return Err(AppError::Validation("maxTokens must be positive".to_string()));
    }

    let id = state
        .conversations
        .create(request.message, request.max_tokens)
        .await;
    tracing::info!("created conversation {}", id);

    Ok((StatusCode::CREATED, Json(CreateConversationResponse { id })))
}

/// Explicitly cancel a pending conversation. Idempotent.
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> StatusCode {
    state.conversations.delete(&id).await;
    tracing::info!("deleted conversation {}", id);
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::web::server::create_app;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> (axum::Router, AppState) {
        let state = AppState::new(Config::for_tests()).unwrap();
        (create_app(state.clone()), state)
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/conversations")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_submission_returns_a_fresh_id() {
        let (app, state) = test_app();
        let response = app
            .oneshot(post_json(r#"{"message":"hello","maxTokens":64}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let id = json["id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_eq!(state.conversations.len().await, 1);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let (app, _state) = test_app();
        let response = app.oneshot(post_json(r#"{"message":""}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "message is required");
    }

    #[tokio::test]
    async fn missing_message_is_rejected() {
        let (app, _state) = test_app();
        let response = app.oneshot(post_json(r#"{}"#)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn zero_token_budget_is_rejected() {
        let (app, _state) = test_app();
        let response = app
            .oneshot(post_json(r#"{"message":"hi","maxTokens":0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_cancels_a_pending_conversation() {
        let (app, state) = test_app();
        let id = state.conversations.create("hello".to_string(), None).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/conversations/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.conversations.len().await, 0);

        // Streaming a cancelled id is a 404.
        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/conversations/{id}/stream"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
