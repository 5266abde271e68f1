mod dto;
pub mod handlers;
pub mod matcher;
pub mod repo;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/allergens", get(handlers::list_catalog))
        .route(
            "/allergens/:device_id",
            get(handlers::get_user_allergens).put(handlers::set_user_allergens),
        )
}
