// handlers/public/resources.rs - GET /resources news proxy

use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::error::ApiError;
use crate::news::visible_articles;
use crate::state::AppState;

/// GET /resources - Top health headlines, minus redacted articles
///
/// - upstream 200: filtered `articles` array
/// - upstream non-200: 400 `{"error": "Error fetching news"}`
/// - transport failure: 500 `[]`
pub async fn top_resources(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let reply = state.news.top_headlines().await?;

    if reply.status != 200 {
        tracing::warn!("News API answered with status {}", reply.status);
        return Err(ApiError::UpstreamError);
    }

    Ok(Json(visible_articles(&reply.body)))
}
