mod common;

use anyhow::Result;
use axum::http::StatusCode;
use fitness_api::database::collections::{FOOD, USERS};
use fitness_api::document;
use serde_json::json;

use common::TestApp;

const EMAIL: &str = "test@example.com";

#[tokio::test]
async fn create_food_accepts_any_calorie_value() -> Result<()> {
    let app = TestApp::new().await?;

    let res = app
        .post("/createFood", None, json!({"foodName": "Apple", "calories": "test_value"}))
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "Data saved successfully");

    let food = app.store().find_one(FOOD, document!({"foodName": "Apple"})).await?;
    assert_eq!(food.expect("food stored")["calories"], "test_value");
    Ok(())
}

#[tokio::test]
async fn create_food_replaces_existing_entry() -> Result<()> {
    let app = TestApp::new().await?;

    app.post("/createFood", None, json!({"foodName": "Apple", "calories": 95})).await?;
    app.post("/createFood", None, json!({"foodName": "Apple", "calories": 80})).await?;

    let foods = app.store().find(FOOD, document!({"foodName": "Apple"})).await?;
    assert_eq!(foods.len(), 1);
    assert_eq!(foods[0]["calories"], 80);
    Ok(())
}

#[tokio::test]
async fn calories_consumed_is_persisted() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    let res = app
        .post(
            "/caloriesConsumed",
            Some(&token),
            json!({"intakeDate": "2024-01-07", "intakeFoodItem": "Apple", "intakeCalories": 95}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "Data saved successfully");

    let user = app
        .store()
        .find_one(USERS, document!({"email": EMAIL}))
        .await?
        .expect("user document");
    assert_eq!(
        user["foodConsumed"],
        json!([{"date": "2024-01-07", "item": "Apple", "calories": 95}])
    );
    Ok(())
}

#[tokio::test]
async fn calories_consumed_requires_fields() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    let res = app
        .post("/caloriesConsumed", Some(&token), json!({"intakeDate": "2024-01-07"}))
        .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn fitness_plan_missing_is_404() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    let res = app.get("/getFitnessPlan", Some(&token)).await?;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["status"], "Not Found");
    assert_eq!(res.body["message"], "User not found");
    Ok(())
}

#[tokio::test]
async fn fitness_plan_is_returned_when_stored() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    app.store()
        .insert_one(USERS, document!({"email": EMAIL, "firstName": "Test"}))
        .await?;
    let res = app.get("/getFitnessPlan", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["message"], "No fitness plan found for this user");

    app.store()
        .update_one(
            USERS,
            document!({"email": EMAIL}),
            document!({"$set": {"fitnessPlan": {"monday": "Run 5k"}}}),
            false,
        )
        .await?;
    let res = app.get("/getFitnessPlan", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({"monday": "Run 5k"}));
    Ok(())
}

#[tokio::test]
async fn enrollment_lifecycle() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);
    let event = json!({"eventTitle": "Morning Yoga", "eventDate": "2024-02-01"});

    let res = app.post("/is-enrolled", Some(&token), event.clone()).await?;
    assert_eq!(res.body, json!({"isEnrolled": false}));

    let res = app.post("/enroll", Some(&token), event.clone()).await?;
    assert_eq!(res.status, StatusCode::OK);
    app.post("/enroll", Some(&token), event.clone()).await?;

    let res = app.post("/is-enrolled", Some(&token), event.clone()).await?;
    assert_eq!(res.body, json!({"isEnrolled": true}));

    let res = app.get("/usersEvents", Some(&token)).await?;
    assert_eq!(res.body, json!([{"eventTitle": "Morning Yoga", "eventDate": "2024-02-01"}]));

    let res = app.post("/unenroll", Some(&token), event.clone()).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({"status": "Unenrolled successfully"}));

    let res = app.post("/is-enrolled", Some(&token), event.clone()).await?;
    assert_eq!(res.body, json!({"isEnrolled": false}));

    // Nothing left to remove; still succeeds
    let res = app.post("/unenroll", Some(&token), event).await?;
    assert_eq!(res.status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn enrollments_are_per_user() -> Result<()> {
    let app = TestApp::new().await?;
    let alice = app.token_for("alice@example.com");
    let bob = app.token_for("bob@example.com");

    app.post("/enroll", Some(&alice), json!({"eventTitle": "Spin Class"})).await?;

    let res = app.get("/usersEvents", Some(&bob)).await?;
    assert_eq!(res.body, json!([]));
    let res = app.post("/is-enrolled", Some(&bob), json!({"eventTitle": "Spin Class"})).await?;
    assert_eq!(res.body["isEnrolled"], false);
    Ok(())
}

#[tokio::test]
async fn meals_use_catalogue_calories() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    app.post("/createFood", None, json!({"foodName": "Egg", "calories": 78})).await?;
    app.post("/createFood", None, json!({"foodName": "Toast", "calories": "120"})).await?;

    let res = app
        .post(
            "/createMeal",
            Some(&token),
            json!({"mealName": "Breakfast", "ingredients": ["Egg", "Egg", "Toast", "Unicorn"]}),
        )
        .await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get("/myMeals", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!([{"mealName": "Breakfast", "ingredients": ["Egg", "Egg", "Toast", "Unicorn"], "calories": 276}])
    );
    Ok(())
}

#[tokio::test]
async fn food_calorie_mapping_lists_catalogue() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    app.post("/createFood", None, json!({"foodName": "Egg", "calories": 78})).await?;
    app.post("/createFood", None, json!({"foodName": "Banana", "calories": 105})).await?;

    let res = app.get("/foodCalorieMapping", Some(&token)).await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({"Egg": 78, "Banana": 105}));
    Ok(())
}

#[tokio::test]
async fn profile_and_goals_update() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    let res = app
        .post("/profileUpdate", Some(&token), json!({"age": 30, "weight": 72, "email": "hijack@example.com"}))
        .await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .post("/goalsUpdate", Some(&token), json!({"targetWeight": 68, "targetCalories": 2000}))
        .await?;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get("/profile", Some(&token)).await?;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["email"], EMAIL);
    assert_eq!(res.body["age"], 30);
    assert_eq!(res.body["goals"], json!({"targetWeight": 68, "targetCalories": 2000}));
    Ok(())
}

#[tokio::test]
async fn profile_update_without_known_fields_is_400() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    let res = app.post("/profileUpdate", Some(&token), json!({"favouriteColour": "blue"})).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["msg"], "No updatable fields provided");
    Ok(())
}

#[tokio::test]
async fn week_history_totals_each_day() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    app.post("/goalsUpdate", Some(&token), json!({"targetCalories": 2000})).await?;
    for (date, calories) in [("2024-01-07", 95), ("2024-01-07", 300), ("2024-01-03", 500)] {
        app.post(
            "/caloriesConsumed",
            Some(&token),
            json!({"intakeDate": date, "intakeFoodItem": "Food", "intakeCalories": calories}),
        )
        .await?;
    }
    app.post("/caloriesBurned", Some(&token), json!({"burnoutDate": "2024-01-06", "burntCalories": 250}))
        .await?;

    let res = app.post("/weekHistory", Some(&token), json!({"todayDate": "2024-01-07"})).await?;

    assert_eq!(res.status, StatusCode::OK);
    let days = res.body.as_array().expect("array body");
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2024-01-01");
    assert_eq!(days[2]["caloriesConsumed"], 500);
    assert_eq!(days[5]["caloriesBurned"], 250);
    assert_eq!(days[6]["caloriesConsumed"], 395);
    assert_eq!(days[6]["dayIndex"], 6);
    assert!(days.iter().all(|d| d["goalCalories"] == 2000));
    Ok(())
}

#[tokio::test]
async fn week_history_rejects_bad_date() -> Result<()> {
    let app = TestApp::new().await?;
    let token = app.token_for(EMAIL);

    let res = app.post("/weekHistory", Some(&token), json!({"todayDate": "last tuesday"})).await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    Ok(())
}
