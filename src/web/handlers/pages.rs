//! Demo page handlers

use crate::state::AppState;
use crate::types::AppError;
use axum::{extract::State, response::Html};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render_index()?))
}

pub async fn chat_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render_chat_page()?))
}

pub async fn ping_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.templates.render_ping_page()?))
}
