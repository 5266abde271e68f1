use axum::{
    extract::{Query, State},
    Json,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::dto::{SearchParams, SearchResponse, SearchResultItem};

/// GET /products/search?query=&page=&page_size=
///
/// Thin proxy over the food database's name search. Hits without a code or
/// name, and hits whose name does not actually contain the query, are
/// dropped before returning.
#[instrument(skip(state))]
pub async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::validation("search term must not be empty"));
    }
    if query.chars().count() < 2 {
        return Err(ApiError::validation(
            "search term must be at least 2 characters",
        ));
    }

    let page = state
        .food_api
        .search_by_name(query, params.page, params.page_size)
        .await
        .map_err(|e| ApiError::ExternalService(e.to_string()))?;

    let needle = query.to_lowercase();
    let products = page
        .products
        .into_iter()
        .filter_map(|hit| {
            let code = hit.code.filter(|c| !c.is_empty())?;
            let name = hit.product_name.filter(|n| !n.is_empty())?;
            if !name.to_lowercase().contains(&needle) {
                return None;
            }
            Some(SearchResultItem {
                code,
                product_name: name,
                brands: hit.brands,
                image_url: hit.image_front_small_url,
                nutrition_grade: hit.nutrition_grades,
                calories_per_100g: hit.nutriments.and_then(|n| n.energy_kcal_100g),
            })
        })
        .collect();

    Ok(Json(SearchResponse {
        total_count: page.count.unwrap_or(0),
        page: page.page.unwrap_or(params.page),
        page_size: page.page_size.unwrap_or(params.page_size),
        products,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> SearchParams {
        SearchParams {
            query: query.to_string(),
            page: 1,
            page_size: 20,
        }
    }

    #[tokio::test]
    async fn rejects_empty_and_short_queries() {
        let state = AppState::fake();
        let err = search_products(State(state.clone()), Query(params("  ")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = search_products(State(state), Query(params("m")))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn filters_hits_without_code_or_matching_name() {
        let state = AppState::fake();
        let Json(response) = search_products(State(state), Query(params("milk")))
            .await
            .unwrap();
        // The fake returns "Whole Milk" (kept), "Milk drink" without a code
        // (dropped) and "Cheddar" (name does not contain the query).
        assert_eq!(response.products.len(), 1);
        assert_eq!(response.products[0].code, "111");
        assert_eq!(response.products[0].product_name, "Whole Milk");
        assert_eq!(response.total_count, 3);
    }
}
