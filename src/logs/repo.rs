use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsumptionLog {
    pub id: Uuid,
    pub device_id: String,
    pub code: String,
    pub amount: f32,
    pub log_date: Date,
    pub created_at: OffsetDateTime,
}

pub async fn list_by_device_and_date(
    db: &PgPool,
    device_id: &str,
    date: Date,
) -> anyhow::Result<Vec<ConsumptionLog>> {
    let rows = sqlx::query_as::<_, ConsumptionLog>(
        r#"
        SELECT id, device_id, code, amount, log_date, created_at
        FROM consumption_logs
        WHERE device_id = $1 AND log_date = $2
        ORDER BY created_at ASC
        "#,
    )
    .bind(device_id)
    .bind(date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn add(
    db: &PgPool,
    device_id: &str,
    code: &str,
    amount: f32,
    date: Date,
) -> anyhow::Result<ConsumptionLog> {
    let row = sqlx::query_as::<_, ConsumptionLog>(
        r#"
        INSERT INTO consumption_logs (device_id, code, amount, log_date)
        VALUES ($1, $2, $3, $4)
        RETURNING id, device_id, code, amount, log_date, created_at
        "#,
    )
    .bind(device_id)
    .bind(code)
    .bind(amount)
    .bind(date)
    .fetch_one(db)
    .await?;
    Ok(row)
}

/// The device filter is part of the statement, so a mismatched device id
/// simply affects zero rows; another device's entry is never touched.
pub async fn update_amount(
    db: &PgPool,
    id: Uuid,
    device_id: &str,
    amount: f32,
) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE consumption_logs
        SET amount = $1
        WHERE id = $2 AND device_id = $3
        "#,
    )
    .bind(amount)
    .bind(id)
    .bind(device_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn delete(db: &PgPool, id: Uuid, device_id: &str) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM consumption_logs
        WHERE id = $1 AND device_id = $2
        "#,
    )
    .bind(id)
    .bind(device_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() == 1)
}
