use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::instrument;

use crate::allergens::{matcher, repo as allergen_repo};
use crate::error::ApiError;
use crate::products::service::get_or_fetch;
use crate::state::AppState;

use super::dto::{AllergenWarning, AnalyzeParams, CalorieInfo, ProductAnalysis};
use super::{macros, score};

/// GET /analysis/:barcode?device_id=
///
/// Resolves the product (cache or food API), derives the health score and
/// macro breakdown, and — when a device id is supplied and that device has
/// allergen preferences — cross-references them against the product.
#[instrument(skip(state))]
pub async fn analyze_product(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<ProductAnalysis>, ApiError> {
    let product = get_or_fetch(&state, &barcode).await?;

    let score = score::health_score(&product);
    let macro_breakdown = macros::breakdown(&product);
    let additive_descriptions = state
        .catalog
        .additive_descriptions(product.additives_tags.as_deref());

    let mut allergen_warning = None;
    if let Some(device_id) = params
        .device_id
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    {
        let user_keys = allergen_repo::get_by_device(&state.db, device_id).await?;
        if !user_keys.is_empty() {
            let detected = matcher::find_matching_allergens(
                product.allergens_hierarchy.as_deref(),
                product.allergens_from_ingredients.as_deref(),
                &user_keys,
                &state.catalog,
            );
            allergen_warning = Some(AllergenWarning {
                has_allergen_warning: !detected.is_empty(),
                detected_allergens: detected,
            });
        }
    }

    Ok(Json(ProductAnalysis {
        code: product.code,
        product_name: product.product_name,
        image_front_url: product.image_front_url,
        nova_group: product.nova_group,
        nutrition_grades: product.nutrition_grades,
        score,
        is_healthy: score::is_healthy(score),
        macro_breakdown,
        additive_descriptions,
        allergen_warning,
    }))
}

/// GET /products/:barcode/calories
#[instrument(skip(state))]
pub async fn calorie_info(
    State(state): State<AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<CalorieInfo>, ApiError> {
    let product = get_or_fetch(&state, &barcode).await?;
    let breakdown = macros::breakdown(&product);
    Ok(Json(CalorieInfo {
        code: product.code,
        product_name: product.product_name,
        image_front_url: product.image_front_url,
        breakdown,
    }))
}
