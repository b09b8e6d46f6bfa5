// handlers/public/account.rs - POST /register, POST /login, POST /logout

use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::{hash_password, verify_password};
use crate::database::collections::USERS;
use crate::document;
use crate::error::ApiError;
use crate::handlers::required;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /register - Create or overwrite the account keyed by `email`
///
/// Expected Input:
/// ```json
/// { "email": "string", "password": "string", "firstName": "string", "lastName": "string" }
/// ```
///
/// Registering an email that already exists succeeds and rewrites the
/// password and names.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = required(&payload.email, "email")?.trim();
    let password = required(&payload.password, "password")?;
    let first_name = required(&payload.first_name, "firstName")?;
    let last_name = required(&payload.last_name, "lastName")?;

    let password_hash = hash_password(password)?;

    let outcome = state
        .store
        .update_one(
            USERS,
            document!({ "email": email }),
            document!({
                "$set": {
                    "password": password_hash,
                    "firstName": first_name,
                    "lastName": last_name
                }
            }),
            true,
        )
        .await?;

    if outcome.upserted_id.is_some() {
        info!("Registered new user {}", email);
    } else {
        info!("Re-registration overwrote existing user {}", email);
    }

    Ok(Json(json!({ "msg": "register successful" })))
}

/// POST /login - Exchange email and password for a bearer token
///
/// Expected Output:
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiI..." }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let email = required(&payload.email, "email")?.trim();
    let password = required(&payload.password, "password")?;

    let user = state.store.find_one(USERS, document!({ "email": email })).await?;
    let stored_hash = user
        .as_ref()
        .and_then(|u| u.get("password"))
        .and_then(Value::as_str);

    match stored_hash {
        Some(hash) if verify_password(password, hash) => {
            let token = state.tokens.issue(email)?;
            info!("User {} logged in", email);
            Ok(Json(json!({ "access_token": token })))
        }
        _ => {
            warn!("Failed login attempt for {}", email);
            Err(ApiError::unauthorized("Bad email or password"))
        }
    }
}

/// POST /logout - Tokens are stateless, so there is nothing to revoke
pub async fn logout() -> Json<Value> {
    Json(json!({ "msg": "logout successful" }))
}
