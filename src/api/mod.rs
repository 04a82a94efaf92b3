mod mealdb;

pub use mealdb::MealDbClient;

use async_trait::async_trait;

use crate::error::BrowserError;
use crate::model::MealRecord;

/// The upstream recipe API, one method per endpoint consumed
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// One random recipe (`random.php`)
    async fn random_meal(&self) -> Result<MealRecord, BrowserError>;

    /// Recipes in a category (`filter.php?c=`); empty when the upstream has none
    async fn filter_by_category(&self, category: &str) -> Result<Vec<MealRecord>, BrowserError>;

    /// Recipes whose name matches (`search.php?s=`); empty when nothing matches
    async fn search_by_name(&self, term: &str) -> Result<Vec<MealRecord>, BrowserError>;

    /// A single recipe by id (`lookup.php?i=`); `None` when the id is unknown
    async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>, BrowserError>;
}
