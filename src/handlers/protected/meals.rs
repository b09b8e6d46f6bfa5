use axum::{extract::State, response::Json};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::database::collections::{FOOD, MEALS};
use crate::database::{Document, DocumentStore, StoreError};
use crate::document;
use crate::error::ApiError;
use crate::handlers::{calorie_value, number, required, saved};
use crate::middleware::Identity;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub meal_name: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// GET /foodCalorieMapping - `{foodName: calories}` for the whole catalogue
pub async fn food_calorie_mapping(
    State(state): State<AppState>,
    _identity: Identity,
) -> Result<Json<Map<String, Value>>, ApiError> {
    let foods = state.store.find(FOOD, document!({})).await?;

    let mapping = foods
        .into_iter()
        .filter_map(|mut food| {
            let name = food.remove("foodName")?.as_str()?.to_string();
            let calories = food.remove("calories").unwrap_or(Value::Null);
            Some((name, calories))
        })
        .collect();

    Ok(Json(mapping))
}

/// Sum of catalogue calories; unknown ingredients count as zero
async fn meal_calories(store: &dyn DocumentStore, ingredients: &[String]) -> Result<f64, StoreError> {
    let mut total = 0.0;
    for ingredient in ingredients {
        let food = store.find_one(FOOD, document!({ "foodName": ingredient })).await?;
        match food.as_ref().and_then(|f| f.get("calories")).and_then(calorie_value) {
            Some(calories) => total += calories,
            None => tracing::debug!("No calorie data for ingredient '{}'", ingredient),
        }
    }
    Ok(total)
}

/// POST /createMeal
pub async fn create_meal(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<CreateMealRequest>,
) -> Result<Json<Value>, ApiError> {
    let meal_name = required(&payload.meal_name, "mealName")?.trim();
    let calories = meal_calories(state.store.as_ref(), &payload.ingredients).await?;

    state
        .store
        .update_one(
            MEALS,
            document!({ "email": identity.email(), "mealName": meal_name }),
            document!({
                "$set": {
                    "ingredients": payload.ingredients,
                    "calories": number(calories)
                }
            }),
            true,
        )
        .await?;

    Ok(Json(saved()))
}

/// GET /myMeals
pub async fn my_meals(State(state): State<AppState>, identity: Identity) -> Result<Json<Vec<Document>>, ApiError> {
    let meals = state
        .store
        .find(MEALS, document!({ "email": identity.email() }))
        .await?
        .into_iter()
        .map(|mut meal| {
            meal.remove("_id");
            meal.remove("email");
            meal
        })
        .collect();

    Ok(Json(meals))
}
