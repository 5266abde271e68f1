use serde::{Deserialize, Serialize};

use super::macros::MacroBreakdown;

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AllergenWarning {
    pub has_allergen_warning: bool,
    pub detected_allergens: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ProductAnalysis {
    pub code: String,
    pub product_name: Option<String>,
    pub image_front_url: Option<String>,
    pub nova_group: Option<String>,
    pub nutrition_grades: Option<String>,
    pub score: i32,
    pub is_healthy: bool,
    pub macro_breakdown: MacroBreakdown,
    pub additive_descriptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergen_warning: Option<AllergenWarning>,
}

#[derive(Debug, Serialize)]
pub struct CalorieInfo {
    pub code: String,
    pub product_name: Option<String>,
    pub image_front_url: Option<String>,
    #[serde(flatten)]
    pub breakdown: MacroBreakdown,
}
