pub mod dto;
pub mod handlers;
pub mod machine;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/onboarding",
            post(handlers::start).delete(handlers::cancel),
        )
        .route("/users/:user_id/onboarding/reply", post(handlers::reply))
        .route("/users/:user_id/profile", get(handlers::profile))
}
