use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::goals::repo as goal_repo;
use crate::products::repo as product_repo;
use crate::state::AppState;

use super::dto::{AddConsumptionRequest, DeleteParams, SummaryParams, UpdateAmountRequest};
use super::repo::{self, ConsumptionLog};
use super::summary::{build_summary, DailySummary};

/// POST /logs
#[instrument(skip(state, body))]
pub async fn add_consumption(
    State(state): State<AppState>,
    Json(body): Json<AddConsumptionRequest>,
) -> Result<(StatusCode, Json<ConsumptionLog>), ApiError> {
    let device_id = validated_device(&body.device_id)?;
    let code = body.code.trim();
    if code.is_empty() {
        return Err(ApiError::validation("product code must not be empty"));
    }
    if body.amount <= 0.0 {
        return Err(ApiError::validation("amount must be greater than zero"));
    }

    let date = body
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());
    let log = repo::add(&state.db, device_id, code, body.amount, date).await?;
    info!(device_id, code, amount = body.amount, "consumption logged");

    Ok((StatusCode::CREATED, Json(log)))
}

/// PATCH /logs/:id
///
/// Ownership is enforced in the statement itself: a device id that does not
/// own the entry updates nothing and the caller gets a not-found, per the
/// deliberate "no distinct forbidden error" policy.
#[instrument(skip(state, body))]
pub async fn update_amount(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAmountRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let device_id = validated_device(&body.device_id)?;
    if body.amount <= 0.0 {
        return Err(ApiError::validation("amount must be greater than zero"));
    }

    let updated = repo::update_amount(&state.db, id, device_id, body.amount).await?;
    if !updated {
        return Err(ApiError::not_found(format!("log entry {id}")));
    }
    Ok(Json(json!({ "message": "consumption updated" })))
}

/// DELETE /logs/:id?device_id=
#[instrument(skip(state))]
pub async fn delete_consumption(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let device_id = validated_device(&params.device_id)?;

    let deleted = repo::delete(&state.db, id, device_id).await?;
    if !deleted {
        return Err(ApiError::not_found(format!("log entry {id}")));
    }
    Ok(Json(json!({ "message": "consumption deleted" })))
}

/// GET /logs/summary/:device_id?date=YYYY-MM-DD
///
/// One batch product lookup for the day's distinct codes, then a pure
/// aggregation pass.
#[instrument(skip(state))]
pub async fn daily_summary(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<DailySummary>, ApiError> {
    let device_id = validated_device(&device_id)?;
    let date = params
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    let logs = repo::list_by_device_and_date(&state.db, device_id, date).await?;

    let mut codes: Vec<String> = logs.iter().map(|l| l.code.clone()).collect();
    codes.sort();
    codes.dedup();

    let products: HashMap<_, _> = product_repo::get_by_codes(&state.db, &codes)
        .await?
        .into_iter()
        .map(|p| (p.code.clone(), p))
        .collect();

    let goal_target = goal_repo::get_by_device(&state.db, device_id)
        .await?
        .map(|g| g.daily_calorie_target);

    Ok(Json(build_summary(date, &logs, &products, goal_target)))
}

fn validated_device(device_id: &str) -> Result<&str, ApiError> {
    let trimmed = device_id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("device id must not be empty"));
    }
    Ok(trimmed)
}
