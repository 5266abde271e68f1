use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FoodApiConfig {
    pub base_url: String,
    pub search_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub food_api: FoodApiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let food_api = FoodApiConfig {
            base_url: std::env::var("FOOD_API_BASE_URL")
                .unwrap_or_else(|_| "https://world.openfoodfacts.org/api/v0".into()),
            search_url: std::env::var("FOOD_API_SEARCH_URL")
                .unwrap_or_else(|_| "https://world.openfoodfacts.org/cgi/search.pl".into()),
            user_agent: std::env::var("FOOD_API_USER_AGENT")
                .unwrap_or_else(|_| "EatWell/1.0".into()),
        };
        Ok(Self {
            database_url,
            food_api,
        })
    }
}
