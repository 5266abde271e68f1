use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{AllergenCatalogItem, SetAllergensRequest};
use super::repo;

/// GET /allergens — every allergen the app knows about, for the settings UI.
#[instrument(skip(state))]
pub async fn list_catalog(
    State(state): State<AppState>,
) -> Result<Json<Vec<AllergenCatalogItem>>, ApiError> {
    let items = state
        .catalog
        .allergens()
        .into_iter()
        .map(|(key, info)| AllergenCatalogItem {
            key: key.to_string(),
            name: info.name.to_string(),
            emoji: info.emoji.to_string(),
        })
        .collect();
    Ok(Json(items))
}

/// GET /allergens/:device_id
#[instrument(skip(state))]
pub async fn get_user_allergens(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    let device_id = validated_device(&device_id)?;
    let keys = repo::get_by_device(&state.db, device_id).await?;
    Ok(Json(keys))
}

/// PUT /allergens/:device_id — replaces the device's whole allergen set.
#[instrument(skip(state, body))]
pub async fn set_user_allergens(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(body): Json<SetAllergensRequest>,
) -> Result<Json<Vec<String>>, ApiError> {
    let device_id = validated_device(&device_id)?;

    let keys: Vec<String> = body
        .allergen_keys
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    repo::replace_all(&state.db, device_id, &keys).await?;
    info!(device_id, count = keys.len(), "allergen profile replaced");

    Ok(Json(keys))
}

fn validated_device(device_id: &str) -> Result<&str, ApiError> {
    let trimmed = device_id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("device id must not be empty"));
    }
    Ok(trimmed)
}
