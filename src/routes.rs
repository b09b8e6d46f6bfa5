use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{protected, public};
use crate::middleware::gate::{self, Gate, RoutePolicy};
use crate::state::AppState;

/// Build the full application router around a server context
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(public_routes(&state))
        .merge(protected_routes(&state));

    if state.config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security.cors_origins));
    }

    router.with_state(state)
}

/// Wrap a route in its gate. `layer` (not `route_layer`) so the gate also sees
/// verbs the route never registered and answers those with 405 itself.
fn guarded(state: &AppState, policy: RoutePolicy, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    let gate = Gate::new(policy, state.tokens.clone());
    route.layer(middleware::from_fn_with_state(gate, gate::gate_middleware))
}

fn public_routes(state: &AppState) -> Router<AppState> {
    let public_get = RoutePolicy::public(gate::GET);
    let public_post = RoutePolicy::public(gate::POST);

    Router::new()
        .route("/health", guarded(state, public_get, get(public::health)))
        .route("/events", guarded(state, public_get, get(public::list_events)))
        // Accounts
        .route("/register", guarded(state, public_post, post(public::register)))
        .route("/login", guarded(state, public_post, post(public::login)))
        .route("/logout", guarded(state, public_post, post(public::logout)))
        // Shared food catalogue
        .route("/createFood", guarded(state, public_post, post(public::create_food)))
        // External collaborators
        .route("/resources", guarded(state, public_get, get(public::top_resources)))
        .route("/chatbot", guarded(state, public_post, post(public::ask)))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    let user_get = RoutePolicy::identified(gate::GET);
    let user_post = RoutePolicy::identified(gate::POST);

    Router::new()
        // Profile and goals
        .route("/profile", guarded(state, user_get, get(protected::my_profile)))
        .route("/profileUpdate", guarded(state, user_post, post(protected::profile_update)))
        .route("/goalsUpdate", guarded(state, user_post, post(protected::goals_update)))
        .route("/getFitnessPlan", guarded(state, user_get, get(protected::fitness_plan)))
        // Event enrollment
        .route("/usersEvents", guarded(state, user_get, get(protected::users_events)))
        .route("/enroll", guarded(state, user_post, post(protected::enroll)))
        .route("/is-enrolled", guarded(state, user_post, post(protected::is_enrolled)))
        .route("/unenroll", guarded(state, user_post, post(protected::unenroll)))
        // Food and meals
        .route("/foodCalorieMapping", guarded(state, user_get, get(protected::food_calorie_mapping)))
        .route("/createMeal", guarded(state, user_post, post(protected::create_meal)))
        .route("/myMeals", guarded(state, user_get, get(protected::my_meals)))
        // Calorie logs
        .route("/caloriesConsumed", guarded(state, user_post, post(protected::calories_consumed)))
        .route("/caloriesBurned", guarded(state, user_post, post(protected::calories_burned)))
        .route("/weekHistory", guarded(state, user_post, post(protected::week_history)))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
