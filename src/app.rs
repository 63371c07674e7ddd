use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/walk/r", post(handlers::walk_r))
        .route("/walk/o", post(handlers::walk_o))
        .route("/reset", post(handlers::reset))
        .route("/api/state", get(handlers::get_state))
        .route("/api/series", get(handlers::get_series))
        .route("/api/cycle", post(handlers::cycle))
        .with_state(state)
}
