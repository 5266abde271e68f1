use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}
fn default_page_size() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct SearchResultItem {
    pub code: String,
    pub product_name: String,
    pub brands: Option<String>,
    pub image_url: Option<String>,
    pub nutrition_grade: Option<String>,
    pub calories_per_100g: Option<f32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total_count: i64,
    pub page: i64,
    pub page_size: i64,
    pub products: Vec<SearchResultItem>,
}
