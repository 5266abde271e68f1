mod dto;
pub mod handlers;
pub mod repo;
pub mod summary;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/logs", post(handlers::add_consumption))
        .route(
            "/logs/:id",
            axum::routing::patch(handlers::update_amount).delete(handlers::delete_consumption),
        )
        .route("/logs/summary/:device_id", get(handlers::daily_summary))
}
