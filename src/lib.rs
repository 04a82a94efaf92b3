pub mod api;
pub mod browser;
pub mod config;
pub mod error;
pub mod favorites;
pub mod fetcher;
pub mod model;
pub mod render;
pub mod storage;

pub use api::{MealDbClient, RecipeApi};
pub use browser::{Card, Intent, RecipeBrowser, View};
pub use config::BrowserConfig;
pub use error::{BrowserError, StorageError};
pub use favorites::FavoritesStore;
pub use fetcher::{AggregateFetcher, JoinPolicy};
pub use model::{RecipeDetail, RecipeSummary};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use log::debug;

/// Build a browser backed by TheMealDB and a favorites file, as configured
pub fn open_browser(
    config: &BrowserConfig,
) -> Result<RecipeBrowser<MealDbClient, FileStore>, BrowserError> {
    let client = MealDbClient::new(&config.api)?;
    let store = FileStore::open(&config.storage_path);
    debug!(
        "Using {} with favorites at {}",
        client.base_url(),
        store.path().display()
    );

    Ok(RecipeBrowser::new(AggregateFetcher::new(client), FavoritesStore::load(store))
        .with_batch_sizes(config.random_batch_size, config.featured_count))
}

/// Fetch the full details of one recipe with the default configuration
pub async fn fetch_recipe(id: &str) -> Result<RecipeDetail, BrowserError> {
    let config = BrowserConfig::load()?;
    let fetcher = AggregateFetcher::new(MealDbClient::new(&config.api)?);
    fetcher.fetch_detail(id).await
}
