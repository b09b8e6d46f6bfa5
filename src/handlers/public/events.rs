use axum::{extract::State, response::Json};

use crate::database::{collections::EVENTS, Document};
use crate::document;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /events - Every event document, verbatim
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let events = state.store.find(EVENTS, document!({})).await?;
    Ok(Json(events))
}
