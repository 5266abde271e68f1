use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::client::RemoteProduct;

/// Cached product record, keyed by barcode. Treated as immutable reference
/// data once fetched: numeric fields stay `Option` so "absent" remains
/// distinguishable from "zero" until the aggregation boundary.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub code: String,
    pub product_name: Option<String>,
    pub image_front_url: Option<String>,
    pub additives_tags: Option<Vec<String>>,
    pub allergens_from_ingredients: Option<String>,
    pub allergens_hierarchy: Option<Vec<String>>,
    pub nova_group: Option<String>,
    pub nutrition_grades: Option<String>,
    pub salt_100g: Option<f32>,
    pub fat_100g: Option<f32>,
    pub saturated_fat_100g: Option<f32>,
    pub sugars_100g: Option<f32>,
    pub carbohydrates_100g: Option<f32>,
    pub energy_kcal_100g: Option<f32>,
    pub proteins_100g: Option<f32>,
    pub fat_level: Option<String>,
    pub salt_level: Option<String>,
    pub saturated_fat_level: Option<String>,
    pub sugars_level: Option<String>,
    pub fetched_at: OffsetDateTime,
}

impl Product {
    pub fn from_remote(barcode: &str, remote: RemoteProduct) -> Self {
        let nutriments = remote.nutriments.unwrap_or_default();
        let levels = remote.nutrient_levels.unwrap_or_default();
        Self {
            code: remote
                .code
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| barcode.to_string()),
            product_name: remote.product_name,
            image_front_url: remote.image_front_url,
            additives_tags: remote.additives_tags,
            allergens_from_ingredients: remote.allergens_from_ingredients,
            allergens_hierarchy: remote.allergens_hierarchy,
            nova_group: remote.nova_group,
            nutrition_grades: remote.nutrition_grades,
            salt_100g: nutriments.salt_100g,
            fat_100g: nutriments.fat_100g,
            saturated_fat_100g: nutriments.saturated_fat_100g,
            sugars_100g: nutriments.sugars_100g,
            carbohydrates_100g: nutriments.carbohydrates_100g,
            energy_kcal_100g: nutriments.energy_kcal_100g,
            proteins_100g: nutriments.proteins_100g,
            fat_level: levels.fat,
            salt_level: levels.salt,
            saturated_fat_level: levels.saturated_fat,
            sugars_level: levels.sugars,
            fetched_at: OffsetDateTime::now_utc(),
        }
    }
}

const PRODUCT_COLUMNS: &str = r#"
    code, product_name, image_front_url, additives_tags,
    allergens_from_ingredients, allergens_hierarchy, nova_group,
    nutrition_grades, salt_100g, fat_100g, saturated_fat_100g, sugars_100g,
    carbohydrates_100g, energy_kcal_100g, proteins_100g, fat_level,
    salt_level, saturated_fat_level, sugars_level, fetched_at
"#;

pub async fn get_by_code(db: &PgPool, code: &str) -> anyhow::Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE code = $1"
    ))
    .bind(code)
    .fetch_optional(db)
    .await?;
    Ok(product)
}

/// Batch lookup used by the daily summary so each entry does not cost a
/// round trip of its own.
pub async fn get_by_codes(db: &PgPool, codes: &[String]) -> anyhow::Result<Vec<Product>> {
    if codes.is_empty() {
        return Ok(Vec::new());
    }
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE code = ANY($1)"
    ))
    .bind(codes)
    .fetch_all(db)
    .await?;
    Ok(products)
}

pub async fn insert(db: &PgPool, product: &Product) -> anyhow::Result<()> {
    // DO NOTHING covers the race where two requests fetch the same barcode
    // concurrently; the cache is immutable so either copy is fine.
    sqlx::query(
        r#"
        INSERT INTO products (
            code, product_name, image_front_url, additives_tags,
            allergens_from_ingredients, allergens_hierarchy, nova_group,
            nutrition_grades, salt_100g, fat_100g, saturated_fat_100g,
            sugars_100g, carbohydrates_100g, energy_kcal_100g, proteins_100g,
            fat_level, salt_level, saturated_fat_level, sugars_level, fetched_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        ON CONFLICT (code) DO NOTHING
        "#,
    )
    .bind(&product.code)
    .bind(&product.product_name)
    .bind(&product.image_front_url)
    .bind(&product.additives_tags)
    .bind(&product.allergens_from_ingredients)
    .bind(&product.allergens_hierarchy)
    .bind(&product.nova_group)
    .bind(&product.nutrition_grades)
    .bind(product.salt_100g)
    .bind(product.fat_100g)
    .bind(product.saturated_fat_100g)
    .bind(product.sugars_100g)
    .bind(product.carbohydrates_100g)
    .bind(product.energy_kcal_100g)
    .bind(product.proteins_100g)
    .bind(&product.fat_level)
    .bind(&product.salt_level)
    .bind(&product.saturated_fat_level)
    .bind(&product.sugars_level)
    .bind(product.fetched_at)
    .execute(db)
    .await?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_product(code: &str) -> Product {
    Product {
        code: code.to_string(),
        product_name: None,
        image_front_url: None,
        additives_tags: None,
        allergens_from_ingredients: None,
        allergens_hierarchy: None,
        nova_group: None,
        nutrition_grades: None,
        salt_100g: None,
        fat_100g: None,
        saturated_fat_100g: None,
        sugars_100g: None,
        carbohydrates_100g: None,
        energy_kcal_100g: None,
        proteins_100g: None,
        fat_level: None,
        salt_level: None,
        saturated_fat_level: None,
        sugars_level: None,
        fetched_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::client::{RemoteNutriments, RemoteProduct};

    #[test]
    fn from_remote_falls_back_to_requested_barcode() {
        let remote = RemoteProduct {
            code: None,
            product_name: Some("Yogurt".into()),
            ..Default::default()
        };
        let product = Product::from_remote("5901234123457", remote);
        assert_eq!(product.code, "5901234123457");
        assert_eq!(product.product_name.as_deref(), Some("Yogurt"));
    }

    #[test]
    fn from_remote_keeps_absent_masses_absent() {
        let remote = RemoteProduct {
            code: Some("123".into()),
            nutriments: Some(RemoteNutriments {
                energy_kcal_100g: Some(250.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let product = Product::from_remote("123", remote);
        assert_eq!(product.energy_kcal_100g, Some(250.0));
        assert_eq!(product.fat_100g, None);
        assert_eq!(product.proteins_100g, None);
    }
}
