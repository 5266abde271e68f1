use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

use super::repo::{self, Product};

/// Cache-through barcode resolution: local row wins, otherwise the food API
/// is asked once and the result is stored for good.
pub async fn get_or_fetch(state: &AppState, barcode: &str) -> Result<Product, ApiError> {
    let barcode = barcode.trim();
    if barcode.is_empty() {
        return Err(ApiError::validation("barcode must not be empty"));
    }

    if let Some(existing) = repo::get_by_code(&state.db, barcode).await? {
        return Ok(existing);
    }

    let remote = state
        .food_api
        .product_by_barcode(barcode)
        .await
        .map_err(|e| ApiError::ExternalService(e.to_string()))?
        .ok_or_else(|| ApiError::not_found(format!("product {barcode}")))?;

    // Another request may have cached it while we were fetching.
    if let Some(existing) = repo::get_by_code(&state.db, barcode).await? {
        return Ok(existing);
    }

    let product = Product::from_remote(barcode, remote);
    repo::insert(&state.db, &product).await?;
    info!(barcode, name = ?product.product_name, "product cached from food api");

    Ok(product)
}
