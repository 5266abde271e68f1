use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CalorieGoal {
    pub device_id: String,
    pub weight: f32,
    pub height: f32,
    pub age: i32,
    pub gender: String,
    pub activity_level: i32,
    pub goal_type: i32,
    pub bmr: f32,
    pub tdee: f32,
    pub daily_calorie_target: f32,
    pub updated_at: OffsetDateTime,
}

pub async fn get_by_device(db: &PgPool, device_id: &str) -> anyhow::Result<Option<CalorieGoal>> {
    let goal = sqlx::query_as::<_, CalorieGoal>(
        r#"
        SELECT device_id, weight, height, age, gender, activity_level,
               goal_type, bmr, tdee, daily_calorie_target, updated_at
        FROM calorie_goals
        WHERE device_id = $1
        "#,
    )
    .bind(device_id)
    .fetch_optional(db)
    .await?;
    Ok(goal)
}

/// One goal per device, latest write wins.
pub async fn upsert(db: &PgPool, goal: &CalorieGoal) -> anyhow::Result<CalorieGoal> {
    let stored = sqlx::query_as::<_, CalorieGoal>(
        r#"
        INSERT INTO calorie_goals (
            device_id, weight, height, age, gender, activity_level,
            goal_type, bmr, tdee, daily_calorie_target, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        ON CONFLICT (device_id) DO UPDATE SET
            weight = EXCLUDED.weight,
            height = EXCLUDED.height,
            age = EXCLUDED.age,
            gender = EXCLUDED.gender,
            activity_level = EXCLUDED.activity_level,
            goal_type = EXCLUDED.goal_type,
            bmr = EXCLUDED.bmr,
            tdee = EXCLUDED.tdee,
            daily_calorie_target = EXCLUDED.daily_calorie_target,
            updated_at = EXCLUDED.updated_at
        RETURNING device_id, weight, height, age, gender, activity_level,
                  goal_type, bmr, tdee, daily_calorie_target, updated_at
        "#,
    )
    .bind(&goal.device_id)
    .bind(goal.weight)
    .bind(goal.height)
    .bind(goal.age)
    .bind(&goal.gender)
    .bind(goal.activity_level)
    .bind(goal.goal_type)
    .bind(goal.bmr)
    .bind(goal.tdee)
    .bind(goal.daily_calorie_target)
    .bind(goal.updated_at)
    .fetch_one(db)
    .await?;
    Ok(stored)
}
