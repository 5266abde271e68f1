//! Open Food Facts client. The upstream JSON is messy: numeric fields can
//! arrive as numbers or strings and `nova_group` flips between the two, so
//! the deserializers here accept both.

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::config::FoodApiConfig;

#[async_trait]
pub trait FoodApi: Send + Sync {
    /// Resolve a barcode. `Ok(None)` means the upstream database does not
    /// know the product; `Err` means the upstream call itself failed.
    async fn product_by_barcode(&self, barcode: &str) -> anyhow::Result<Option<RemoteProduct>>;

    async fn search_by_name(
        &self,
        query: &str,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<SearchPage>;
}

fn de_opt_string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

fn de_opt_f32<'de, D>(de: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64().map(|f| f as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    }))
}

fn de_opt_i64<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(de)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteNutriments {
    #[serde(default, rename = "energy-kcal_100g", deserialize_with = "de_opt_f32")]
    pub energy_kcal_100g: Option<f32>,
    #[serde(default, deserialize_with = "de_opt_f32")]
    pub fat_100g: Option<f32>,
    #[serde(default, rename = "saturated-fat_100g", deserialize_with = "de_opt_f32")]
    pub saturated_fat_100g: Option<f32>,
    #[serde(default, deserialize_with = "de_opt_f32")]
    pub sugars_100g: Option<f32>,
    #[serde(default, deserialize_with = "de_opt_f32")]
    pub carbohydrates_100g: Option<f32>,
    #[serde(default, deserialize_with = "de_opt_f32")]
    pub proteins_100g: Option<f32>,
    #[serde(default, deserialize_with = "de_opt_f32")]
    pub salt_100g: Option<f32>,
}

/// Qualitative low/moderate/high tags per nutrient.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteNutrientLevels {
    pub fat: Option<String>,
    pub salt: Option<String>,
    #[serde(rename = "saturated-fat")]
    pub saturated_fat: Option<String>,
    pub sugars: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteProduct {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub code: Option<String>,
    pub product_name: Option<String>,
    pub image_front_url: Option<String>,
    pub additives_tags: Option<Vec<String>>,
    pub allergens_from_ingredients: Option<String>,
    pub allergens_hierarchy: Option<Vec<String>>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub nova_group: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub nutrition_grades: Option<String>,
    pub nutrient_levels: Option<RemoteNutrientLevels>,
    pub nutriments: Option<RemoteNutriments>,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    #[serde(default, deserialize_with = "de_opt_i64")]
    status: Option<i64>,
    product: Option<RemoteProduct>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteSearchHit {
    #[serde(default, deserialize_with = "de_opt_string")]
    pub code: Option<String>,
    pub product_name: Option<String>,
    pub brands: Option<String>,
    pub image_front_small_url: Option<String>,
    #[serde(default, deserialize_with = "de_opt_string")]
    pub nutrition_grades: Option<String>,
    pub nutriments: Option<RemoteNutriments>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub count: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_i64")]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub products: Vec<RemoteSearchHit>,
}

pub struct OpenFoodFactsClient {
    http: reqwest::Client,
    base_url: String,
    search_url: String,
}

impl OpenFoodFactsClient {
    pub fn new(config: &FoodApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("build food api http client")?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            search_url: config.search_url.clone(),
        })
    }
}

#[async_trait]
impl FoodApi for OpenFoodFactsClient {
    async fn product_by_barcode(&self, barcode: &str) -> anyhow::Result<Option<RemoteProduct>> {
        let url = format!("{}/product/{}.json", self.base_url, barcode);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("food api request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("food api returned {}", response.status());
        }

        let envelope: ProductEnvelope = response
            .json()
            .await
            .context("decode food api product response")?;

        debug!(barcode, status = ?envelope.status, "food api product lookup");
        if envelope.status != Some(1) {
            return Ok(None);
        }
        Ok(envelope.product)
    }

    async fn search_by_name(
        &self,
        query: &str,
        page: i64,
        page_size: i64,
    ) -> anyhow::Result<SearchPage> {
        // V1 search API, sorted by scan count so well-known products rank first.
        let page = page.to_string();
        let page_size = page_size.to_string();
        let response = self
            .http
            .get(&self.search_url)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page", page.as_str()),
                ("page_size", page_size.as_str()),
                ("sort_by", "unique_scans_n"),
                (
                    "fields",
                    "code,product_name,brands,image_front_small_url,nutrition_grades,nova_group,nutriments",
                ),
            ])
            .send()
            .await
            .context("food api search request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("food api search returned {}", response.status());
        }

        response
            .json::<SearchPage>()
            .await
            .context("decode food api search response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_envelope_accepts_numeric_and_string_fields() {
        let json = r#"{
            "status": "1",
            "product": {
                "code": 4000417025005,
                "product_name": "Hazelnut spread",
                "nova_group": 4,
                "nutrition_grades": "e",
                "nutrient_levels": {"fat": "high", "saturated-fat": "high", "sugars": "high", "salt": "low"},
                "nutriments": {"energy-kcal_100g": "539", "fat_100g": 30.9, "proteins_100g": 6.3}
            }
        }"#;
        let envelope: ProductEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, Some(1));
        let product = envelope.product.unwrap();
        assert_eq!(product.code.as_deref(), Some("4000417025005"));
        assert_eq!(product.nova_group.as_deref(), Some("4"));
        let nutriments = product.nutriments.unwrap();
        assert_eq!(nutriments.energy_kcal_100g, Some(539.0));
        assert_eq!(nutriments.fat_100g, Some(30.9));
        assert_eq!(nutriments.sugars_100g, None);
    }

    #[test]
    fn missing_product_has_status_zero() {
        let json = r#"{"status": 0, "status_verbose": "product not found"}"#;
        let envelope: ProductEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, Some(0));
        assert!(envelope.product.is_none());
    }

    #[test]
    fn search_page_tolerates_string_paging_fields() {
        let json = r#"{"count": "120", "page": 1, "page_size": "20", "products": [{"code": "123", "product_name": "Oat milk"}]}"#;
        let page: SearchPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, Some(120));
        assert_eq!(page.page_size, Some(20));
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].product_name.as_deref(), Some("Oat milk"));
    }
}
