use crate::api::RecipeApi;
use crate::config::ApiConfig;
use crate::error::BrowserError;
use crate::model::{MealRecord, MealsEnvelope};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

/// HTTP client for TheMealDB JSON API
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    /// Create a new client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, BrowserError> {
        let mut builder =
            Client::builder().user_agent("Mozilla/5.0 (compatible; RecipeBrowser/0.1)");
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, BrowserError> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_meals(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<Vec<MealRecord>>, BrowserError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!("{} -> {}", endpoint, body);

        let envelope: MealsEnvelope = serde_json::from_str(&body)
            .map_err(|e| BrowserError::UpstreamFormat(format!("{}: {}", endpoint, e)))?;
        Ok(envelope.meals)
    }
}

#[async_trait]
impl RecipeApi for MealDbClient {
    async fn random_meal(&self) -> Result<MealRecord, BrowserError> {
        self.get_meals("random.php", &[])
            .await?
            .and_then(|meals| meals.into_iter().next())
            .ok_or_else(|| BrowserError::UpstreamFormat("random.php returned no meal".to_string()))
    }

    async fn filter_by_category(&self, category: &str) -> Result<Vec<MealRecord>, BrowserError> {
        Ok(self
            .get_meals("filter.php", &[("c", category)])
            .await?
            .unwrap_or_default())
    }

    async fn search_by_name(&self, term: &str) -> Result<Vec<MealRecord>, BrowserError> {
        Ok(self
            .get_meals("search.php", &[("s", term)])
            .await?
            .unwrap_or_default())
    }

    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>, BrowserError> {
        Ok(self
            .get_meals("lookup.php", &[("i", id)])
            .await?
            .and_then(|meals| meals.into_iter().next()))
    }
}
