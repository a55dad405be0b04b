use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(super::handlers::pages::index))
        .route("/chat", get(super::handlers::pages::chat_page))
        .route("/ping", get(super::handlers::pages::ping_page))
        // API endpoints
        .route(
            "/conversations",
            post(super::handlers::conversations::create_conversation),
        )
        .route(
            "/conversations/{id}",
            delete(super::handlers::conversations::delete_conversation),
        )
        .route(
            "/conversations/{id}/stream",
            get(super::handlers::stream::stream_conversation),
        )
        // Heartbeat
        .route("/ping-stream", get(super::handlers::ping::ping_stream))
        // Health check
        .route("/health", get(super::handlers::health::health_check))
        .with_state(state)
}
