use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::Value;

use crate::database::collections::FOOD;
use crate::document;
use crate::error::ApiError;
use crate::handlers::{required, required_value, saved};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodRequest {
    pub food_name: Option<String>,
    pub calories: Option<Value>,
}

/// POST /createFood - Add or replace an entry in the shared food catalogue
pub async fn create_food(
    State(state): State<AppState>,
    Json(payload): Json<CreateFoodRequest>,
) -> Result<Json<Value>, ApiError> {
    let food_name = required(&payload.food_name, "foodName")?.trim();
    let calories = required_value(&payload.calories, "calories")?;

    state
        .store
        .update_one(
            FOOD,
            document!({ "foodName": food_name }),
            document!({ "$set": { "calories": calories } }),
            true,
        )
        .await?;

    Ok(Json(saved()))
}
