use log::{error, info};

use crate::api::RecipeApi;
use crate::error::BrowserError;
use crate::fetcher::AggregateFetcher;
use crate::favorites::FavoritesStore;
use crate::model::{RecipeDetail, RecipeSummary};
use crate::storage::KeyValueStore;

/// A discrete user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The "all recipes" grid: a batch of random recipes
    AllRecipes,
    /// The featured strip: a smaller batch of random recipes
    Featured,
    Category(String),
    Search(String),
    /// A single random recipe
    Surprise,
    Favorites,
    /// Select a card to see its details
    Detail(String),
    ToggleFavorite(String),
}

/// A recipe card plus whether it is currently a favorite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub recipe: RecipeSummary,
    pub favorite: bool,
}

/// What the rendering collaborator is asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Cards {
        heading: String,
        cards: Vec<Card>,
        /// Shown instead of the grid when `cards` is empty
        empty_message: String,
    },
    Detail {
        recipe: RecipeDetail,
        favorite: bool,
    },
    FavoriteToggled {
        id: String,
        favorite: bool,
    },
    /// Informational text shown in place of results
    Notice(String),
    /// A propagated failure, shown in place of results
    Failure(String),
}

impl View {
    pub fn is_failure(&self) -> bool {
        matches!(self, View::Failure(_))
    }
}

/// Turns intents into views; owns the favorites and the fetcher
pub struct RecipeBrowser<A: RecipeApi, S: KeyValueStore> {
    fetcher: AggregateFetcher<A>,
    favorites: FavoritesStore<S>,
    random_batch_size: usize,
    featured_count: usize,
}

impl<A: RecipeApi, S: KeyValueStore> RecipeBrowser<A, S> {
    pub fn new(fetcher: AggregateFetcher<A>, favorites: FavoritesStore<S>) -> Self {
        Self {
            fetcher,
            favorites,
            random_batch_size: 8,
            featured_count: 5,
        }
    }

    pub fn with_batch_sizes(mut self, random_batch_size: usize, featured_count: usize) -> Self {
        self.random_batch_size = random_batch_size;
        self.featured_count = featured_count;
        self
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub async fn handle(&mut self, intent: Intent) -> View {
        info!("Handling {:?}", intent);
        match intent {
            Intent::AllRecipes => {
                let result = self.fetcher.fetch_random_batch(self.random_batch_size).await;
                self.cards(
                    "All Recipes",
                    "No recipes found.",
                    result,
                    "Failed to load recipes. Please try again later.",
                )
            }
            Intent::Featured => {
                let result = self.fetcher.fetch_random_batch(self.featured_count).await;
                self.cards(
                    "Featured Recipes",
                    "No recipes found.",
                    result,
                    "Failed to load featured recipes.",
                )
            }
            Intent::Category(category) => {
                let result = self.fetcher.fetch_by_category(&category).await;
                self.cards(
                    &format!("{} Recipes", category),
                    "No recipes found.",
                    result,
                    "Failed to load recipes. Please try again later.",
                )
            }
            Intent::Search(term) => {
                let term = term.trim().to_string();
                let result = self.fetcher.fetch_by_search_term(&term).await;
                let result = match result {
                    Err(e @ BrowserError::InvalidArgument(_)) => {
                        return failure(e, "Enter a recipe name to search for.");
                    }
                    other => other,
                };
                self.cards(
                    &format!("Search Results for \"{}\"", term),
                    &format!("No recipes found for \"{}\". Try a different search term.", term),
                    result,
                    "Failed to search recipes. Please try again later.",
                )
            }
            Intent::Surprise => {
                let result = self.fetcher.fetch_random_one().await;
                self.cards(
                    "Random Recipe",
                    "No recipes found.",
                    result,
                    "Failed to load random recipe. Please try again later.",
                )
            }
            Intent::Favorites => {
                if self.favorites.is_empty() {
                    return View::Notice(
                        "You have no saved recipes yet. Save any recipe to see it here."
                            .to_string(),
                    );
                }
                let result = self.fetcher.fetch_by_ids(&self.favorites.all()).await;
                self.cards(
                    "Favorite Recipes",
                    "None of your saved recipes are available anymore.",
                    result,
                    "Failed to load favorite recipes. Please try again later.",
                )
            }
            Intent::Detail(id) => match self.fetcher.fetch_detail(&id).await {
                Ok(recipe) => View::Detail {
                    favorite: self.favorites.contains(&recipe.summary.id),
                    recipe,
                },
                Err(e) => failure(e, "Failed to load recipe details. Please try again later."),
            },
            // Only the toggled recipe is reported; already rendered cards are not refreshed.
            Intent::ToggleFavorite(id) => {
                let favorite = self.favorites.toggle(&id);
                View::FavoriteToggled { id, favorite }
            }
        }
    }

    fn cards(
        &self,
        heading: &str,
        empty_message: &str,
        result: Result<Vec<RecipeSummary>, BrowserError>,
        failure_message: &str,
    ) -> View {
        match result {
            Ok(recipes) => View::Cards {
                heading: heading.to_string(),
                cards: recipes
                    .into_iter()
                    .map(|recipe| Card {
                        favorite: self.favorites.contains(&recipe.id),
                        recipe,
                    })
                    .collect(),
                empty_message: empty_message.to_string(),
            },
            Err(e) => failure(e, failure_message),
        }
    }
}

fn failure(e: BrowserError, message: &str) -> View {
    error!("{}: {}", message, e);
    View::Failure(message.to_string())
}
