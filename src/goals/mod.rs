pub mod calc;
mod dto;
pub mod handlers;
pub mod repo;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/goals/:device_id",
        get(handlers::get_goal).post(handlers::set_goal),
    )
}
