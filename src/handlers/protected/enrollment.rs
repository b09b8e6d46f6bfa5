// handlers/protected/enrollment.rs - Event enrollment records
//
// One record per (email, eventTitle) in the enrollment collection. Enrolling
// twice updates the same record.

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::database::collections::ENROLLMENTS;
use crate::document;
use crate::error::ApiError;
use crate::handlers::{required, saved};
use crate::middleware::Identity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub event_title: Option<String>,
    pub event_date: Option<String>,
}

/// GET /usersEvents - The caller's enrollments
pub async fn users_events(State(state): State<AppState>, identity: Identity) -> Result<Json<Vec<Value>>, ApiError> {
    let records = state
        .store
        .find(ENROLLMENTS, document!({ "email": identity.email() }))
        .await?;

    let events = records
        .into_iter()
        .map(|mut record| {
            record.remove("_id");
            record.remove("email");
            Value::Object(record)
        })
        .collect();

    Ok(Json(events))
}

/// POST /enroll
pub async fn enroll(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<EnrollmentRequest>,
) -> Result<Json<Value>, ApiError> {
    let title = required(&payload.event_title, "eventTitle")?;

    let mut fields = document!({ "eventTitle": title });
    if let Some(date) = &payload.event_date {
        fields.insert("eventDate".to_string(), json!(date));
    }

    state
        .store
        .update_one(
            ENROLLMENTS,
            document!({ "email": identity.email(), "eventTitle": title }),
            document!({ "$set": fields }),
            true,
        )
        .await?;

    info!("{} enrolled in '{}'", identity.email(), title);
    Ok(Json(saved()))
}

/// POST /is-enrolled
pub async fn is_enrolled(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<EnrollmentRequest>,
) -> Result<Json<Value>, ApiError> {
    let title = required(&payload.event_title, "eventTitle")?;

    let record = state
        .store
        .find_one(ENROLLMENTS, document!({ "email": identity.email(), "eventTitle": title }))
        .await?;

    Ok(Json(json!({ "isEnrolled": record.is_some() })))
}

/// POST /unenroll - Succeeds whether or not a record existed
pub async fn unenroll(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<EnrollmentRequest>,
) -> Result<Json<Value>, ApiError> {
    let title = required(&payload.event_title, "eventTitle")?;

    let deleted = state
        .store
        .delete_one(ENROLLMENTS, document!({ "email": identity.email(), "eventTitle": title }))
        .await?;

    if deleted > 0 {
        info!("{} unenrolled from '{}'", identity.email(), title);
    }

    Ok(Json(json!({ "status": "Unenrolled successfully" })))
}
