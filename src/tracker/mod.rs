pub mod dto;
pub mod handlers;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/water", post(handlers::log_water))
        .route("/users/:user_id/food", post(handlers::log_food))
        .route("/users/:user_id/food/grams", post(handlers::food_grams))
        .route("/users/:user_id/workout", post(handlers::log_workout))
        .route("/users/:user_id/progress", get(handlers::progress))
        .route(
            "/users/:user_id/progress/chart",
            get(handlers::progress_chart),
        )
        .route(
            "/users/:user_id/recommendation",
            get(handlers::recommendation),
        )
}
