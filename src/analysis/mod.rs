mod dto;
pub mod handlers;
pub mod macros;
pub mod score;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/analysis/:barcode", get(handlers::analyze_product))
        .route("/products/:barcode/calories", get(handlers::calorie_info))
}
