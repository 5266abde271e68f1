use sqlx::{PgPool, Row};

pub async fn get_by_device(db: &PgPool, device_id: &str) -> anyhow::Result<Vec<String>> {
    let rows = sqlx::query(
        r#"
        SELECT allergen_key
        FROM user_allergens
        WHERE device_id = $1
        ORDER BY allergen_key
        "#,
    )
    .bind(device_id)
    .fetch_all(db)
    .await?;
    Ok(rows
        .into_iter()
        .map(|row| row.get::<String, _>("allergen_key"))
        .collect())
}

/// Wholesale replacement of a device's allergen set; there is no
/// incremental add/remove at this layer.
pub async fn replace_all(db: &PgPool, device_id: &str, keys: &[String]) -> anyhow::Result<()> {
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM user_allergens WHERE device_id = $1")
        .bind(device_id)
        .execute(&mut *tx)
        .await?;

    for key in keys {
        sqlx::query(
            r#"
            INSERT INTO user_allergens (device_id, allergen_key)
            VALUES ($1, $2)
            ON CONFLICT (device_id, allergen_key) DO NOTHING
            "#,
        )
        .bind(device_id)
        .bind(key)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}
