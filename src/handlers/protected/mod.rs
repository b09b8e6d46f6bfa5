// handlers/protected/mod.rs - Handlers that act on the caller's own data
//
// Every handler here takes an `Identity` and keys its reads and writes on
// `identity.email()`. None of them accept a target email from the request.

pub mod calories;
pub mod enrollment;
pub mod meals;
pub mod profile;

pub use calories::{calories_burned, calories_consumed, week_history};
pub use enrollment::{enroll, is_enrolled, unenroll, users_events};
pub use meals::{create_meal, food_calorie_mapping, my_meals};
pub use profile::{fitness_plan, goals_update, my_profile, profile_update};
