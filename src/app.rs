use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/habits", post(handlers::add_habit_form))
        .route("/habits/action", post(handlers::habit_action_form))
        .route("/filter", post(handlers::filter_form))
        .route("/clear", get(handlers::clear_prompt).post(handlers::clear_form))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit_api),
        )
        .route("/api/habits/:id", delete(handlers::delete_habit_api))
        .route("/api/habits/:id/:action", post(handlers::habit_action_api))
        .route("/api/filter", put(handlers::set_filter_api))
        .route("/api/clear", post(handlers::clear_api))
        .with_state(state)
}
