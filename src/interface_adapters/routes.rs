use crate::interface_adapters::handlers::{create_user, get_user, health, list_users};
use crate::interface_adapters::state::AppState;
use axum::{Router, routing::get};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .with_state(state)
}
