// handlers/protected/calories.rs - Calorie intake and burn logs
//
// Intake records live in the user's `foodConsumed` array as {date, item, calories};
// burn records live in `caloriesBurned` as {date, calories}. Dates are YYYY-MM-DD.

use axum::{extract::State, response::Json};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::database::{collections::USERS, document::get_path, Document};
use crate::document;
use crate::error::ApiError;
use crate::handlers::{calorie_value, number, required, required_value, saved};
use crate::middleware::Identity;
use crate::state::AppState;

const DATE_FORMAT: &str = "%Y-%m-%d";
const HISTORY_DAYS: i64 = 7;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRequest {
    pub intake_date: Option<String>,
    pub intake_food_item: Option<String>,
    pub intake_calories: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnRequest {
    pub burnout_date: Option<String>,
    pub burnt_calories: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekHistoryRequest {
    pub today_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub day_index: i64,
    pub date: String,
    pub calories_consumed: Value,
    pub calories_burned: Value,
    pub goal_calories: Value,
}

async fn push_entry(state: &AppState, identity: &Identity, field: &str, entry: Value) -> Result<Json<Value>, ApiError> {
    let mut push = Document::new();
    push.insert(field.to_string(), entry);

    state
        .store
        .update_one(
            USERS,
            document!({ "email": identity.email() }),
            document!({ "$push": push }),
            true,
        )
        .await?;

    Ok(Json(saved()))
}

/// POST /caloriesConsumed
pub async fn calories_consumed(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<IntakeRequest>,
) -> Result<Json<Value>, ApiError> {
    let date = required(&payload.intake_date, "intakeDate")?;
    let item = required(&payload.intake_food_item, "intakeFoodItem")?;
    let calories = required_value(&payload.intake_calories, "intakeCalories")?;

    let entry = serde_json::json!({ "date": date, "item": item, "calories": calories });
    push_entry(&state, &identity, "foodConsumed", entry).await
}

/// POST /caloriesBurned
pub async fn calories_burned(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<BurnRequest>,
) -> Result<Json<Value>, ApiError> {
    let date = required(&payload.burnout_date, "burnoutDate")?;
    let calories = required_value(&payload.burnt_calories, "burntCalories")?;

    let entry = serde_json::json!({ "date": date, "calories": calories });
    push_entry(&state, &identity, "caloriesBurned", entry).await
}

/// POST /weekHistory - Per-day totals for the seven days ending at `todayDate`
pub async fn week_history(
    State(state): State<AppState>,
    identity: Identity,
    Json(payload): Json<WeekHistoryRequest>,
) -> Result<Json<Vec<DaySummary>>, ApiError> {
    let raw = required(&payload.today_date, "todayDate")?;
    let today = parse_date(raw).ok_or_else(|| ApiError::bad_request("Invalid todayDate, expected YYYY-MM-DD"))?;

    let user = state
        .store
        .find_one(USERS, document!({ "email": identity.email() }))
        .await?;

    Ok(Json(summarize_week(user.as_ref(), today)))
}

/// Accepts plain dates and anything ISO-8601 that starts with one
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw.get(..10)?, DATE_FORMAT).ok()
}

fn daily_total(user: Option<&Document>, field: &str, day: NaiveDate) -> f64 {
    user.and_then(|u| u.get(field))
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter(|e| e.get("date").and_then(Value::as_str).and_then(parse_date) == Some(day))
                .filter_map(|e| e.get("calories").and_then(calorie_value))
                .sum()
        })
        .unwrap_or(0.0)
}

/// Oldest day first; `dayIndex` 0 is six days before `today`
pub fn summarize_week(user: Option<&Document>, today: NaiveDate) -> Vec<DaySummary> {
    let goal = user
        .and_then(|u| get_path(u, "goals.targetCalories"))
        .and_then(calorie_value)
        .map(number)
        .unwrap_or(Value::Null);

    (0..HISTORY_DAYS)
        .map(|index| {
            let day = today - Duration::days(HISTORY_DAYS - 1 - index);
            DaySummary {
                day_index: index,
                date: day.format(DATE_FORMAT).to_string(),
                calories_consumed: number(daily_total(user, "foodConsumed", day)),
                calories_burned: number(daily_total(user, "caloriesBurned", day)),
                goal_calories: goal.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_week_without_user_is_zeroed() {
        let week = summarize_week(None, date("2024-01-07"));
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].date, "2024-01-01");
        assert_eq!(week[6].date, "2024-01-07");
        assert!(week.iter().all(|d| d.calories_consumed == json!(0) && d.goal_calories.is_null()));
    }

    #[test]
    fn test_week_sums_per_day() {
        let user = document!({
            "email": "user@example.com",
            "goals": {"targetCalories": "2000"},
            "foodConsumed": [
                {"date": "2024-01-07", "item": "Apple", "calories": 95},
                {"date": "2024-01-07", "item": "Toast", "calories": "120"},
                {"date": "2024-01-05T08:00:00Z", "item": "Oats", "calories": 150},
                {"date": "2023-12-01", "item": "Cake", "calories": 400}
            ],
            "caloriesBurned": [
                {"date": "2024-01-06", "calories": 300.5}
            ]
        });

        let week = summarize_week(Some(&user), date("2024-01-07"));
        assert_eq!(week[6].calories_consumed, json!(215));
        assert_eq!(week[4].calories_consumed, json!(150));
        assert_eq!(week[5].calories_burned, json!(300.5));
        assert_eq!(week[0].calories_consumed, json!(0));
        assert!(week.iter().all(|d| d.goal_calories == json!(2000)));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024-13-01").is_none());
        assert_eq!(parse_date("2024-01-05"), Some(date("2024-01-05")));
    }
}
