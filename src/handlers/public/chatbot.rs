use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::handlers::required;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatbotRequest {
    pub question: Option<String>,
}

/// POST /chatbot
pub async fn ask(
    State(state): State<AppState>,
    Json(payload): Json<ChatbotRequest>,
) -> Result<Json<Value>, ApiError> {
    let question = required(&payload.question, "question")?;
    let answer = state.chatbot.answer(question);
    Ok(Json(json!({ "answer": answer })))
}
