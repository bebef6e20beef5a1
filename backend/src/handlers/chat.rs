//! Chat assistant handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::chat::{ChatReply, ChatRequest};
use crate::AppState;

/// Answer a farming question
pub async fn send_chat_message(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatReply>> {
    let reply = state.chat.reply(request).await?;
    Ok(Json(reply))
}
