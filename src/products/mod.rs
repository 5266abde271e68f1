pub mod client;
mod dto;
pub mod handlers;
pub mod repo;
pub mod service;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/products/search", get(handlers::search_products))
}
