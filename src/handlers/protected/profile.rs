use axum::{extract::State, response::Json};
use serde_json::{Map, Value};

use crate::database::{collections::USERS, Document};
use crate::document;
use crate::error::ApiError;
use crate::handlers::saved;
use crate::middleware::Identity;
use crate::state::AppState;

/// Fields `/profileUpdate` may set on the user document
const PROFILE_FIELDS: &[&str] = &[
    "firstName",
    "lastName",
    "age",
    "weight",
    "height",
    "sex",
    "activityLevel",
    "bmi",
];

/// Fields `/goalsUpdate` may set, stored under `goals.*`
const GOAL_FIELDS: &[&str] = &["targetWeight", "targetCalories", "targetGoal"];

/// Fields that never leave the server
const PRIVATE_FIELDS: &[&str] = &["_id", "password"];

async fn load_user(state: &AppState, identity: &Identity) -> Result<Document, ApiError> {
    state
        .store
        .find_one(USERS, document!({ "email": identity.email() }))
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// `$set` built from the allowed fields present in the body
fn set_fields(body: &Map<String, Value>, allowed: &[&str], prefix: &str) -> Document {
    allowed
        .iter()
        .filter_map(|field| {
            body.get(*field)
                .filter(|v| !v.is_null())
                .map(|v| (format!("{}{}", prefix, field), v.clone()))
        })
        .collect()
}

async fn save_fields(state: &AppState, identity: &Identity, fields: Document) -> Result<Json<Value>, ApiError> {
    if fields.is_empty() {
        return Err(ApiError::bad_request("No updatable fields provided"));
    }

    let mut update = Document::new();
    update.insert("$set".to_string(), Value::Object(fields));

    state
        .store
        .update_one(USERS, document!({ "email": identity.email() }), update, true)
        .await?;

    Ok(Json(saved()))
}

/// GET /profile - The caller's user document without private fields
pub async fn my_profile(State(state): State<AppState>, identity: Identity) -> Result<Json<Document>, ApiError> {
    let mut user = load_user(&state, &identity).await?;
    for field in PRIVATE_FIELDS {
        user.remove(*field);
    }
    Ok(Json(user))
}

/// POST /profileUpdate
pub async fn profile_update(
    State(state): State<AppState>,
    identity: Identity,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let fields = set_fields(&body, PROFILE_FIELDS, "");
    save_fields(&state, &identity, fields).await
}

/// POST /goalsUpdate
pub async fn goals_update(
    State(state): State<AppState>,
    identity: Identity,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let fields = set_fields(&body, GOAL_FIELDS, "goals.");
    save_fields(&state, &identity, fields).await
}

/// GET /getFitnessPlan - 404 when the user or their plan is missing
pub async fn fitness_plan(State(state): State<AppState>, identity: Identity) -> Result<Json<Value>, ApiError> {
    let user = load_user(&state, &identity).await?;

    match user.get("fitnessPlan") {
        Some(plan) if !plan.is_null() => Ok(Json(plan.clone())),
        _ => Err(ApiError::not_found("No fitness plan found for this user")),
    }
}
