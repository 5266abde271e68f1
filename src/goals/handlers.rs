use axum::{
    extract::{Path, State},
    Json,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

use super::calc::{compute_goal, GoalInput};
use super::dto::{GoalDetails, GoalStatusResponse};
use super::repo::{self, CalorieGoal};

/// GET /goals/:device_id
#[instrument(skip(state))]
pub async fn get_goal(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> Result<Json<GoalStatusResponse>, ApiError> {
    let device_id = validated_device(&device_id)?;
    let goal = repo::get_by_device(&state.db, device_id).await?;
    Ok(Json(GoalStatusResponse {
        has_goal: goal.is_some(),
        goal: goal.map(GoalDetails::from),
    }))
}

/// POST /goals/:device_id — validates, computes BMR/TDEE/target and upserts
/// the device's single goal profile.
#[instrument(skip(state, body))]
pub async fn set_goal(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(body): Json<GoalInput>,
) -> Result<Json<GoalDetails>, ApiError> {
    let device_id = validated_device(&device_id)?;

    let now = OffsetDateTime::now_utc();
    let computed = compute_goal(&body, now.year())?;

    let goal = CalorieGoal {
        device_id: device_id.to_string(),
        weight: body.weight,
        height: body.height,
        age: body.age,
        gender: body.gender.to_lowercase(),
        activity_level: body.activity_level,
        goal_type: body.goal_type,
        bmr: computed.bmr,
        tdee: computed.tdee,
        daily_calorie_target: computed.daily_calorie_target,
        updated_at: now,
    };

    let stored = repo::upsert(&state.db, &goal).await?;
    info!(
        device_id,
        target = stored.daily_calorie_target,
        "calorie goal saved"
    );

    Ok(Json(GoalDetails::from(stored)))
}

fn validated_device(device_id: &str) -> Result<&str, ApiError> {
    let trimmed = device_id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("device id must not be empty"));
    }
    Ok(trimmed)
}
