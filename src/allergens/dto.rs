use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct AllergenCatalogItem {
    pub key: String,
    pub name: String,
    pub emoji: String,
}

#[derive(Debug, Deserialize)]
pub struct SetAllergensRequest {
    pub allergen_keys: Vec<String>,
}
