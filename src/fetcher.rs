//! Concurrent fan-out/fan-in over the upstream recipe API.
//!
//! Every batch issues all of its requests before awaiting any of them and
//! completes once all have settled. What happens to failed sub-requests is
//! chosen per call site with a [`JoinPolicy`].

use futures::future::join_all;
use log::{debug, info, warn};

use crate::api::RecipeApi;
use crate::error::BrowserError;
use crate::model::{RecipeDetail, RecipeSummary};

/// How a settled batch treats failed sub-requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinPolicy {
    /// Any failure fails the whole batch
    AllOrNothing,
    /// `NotFound` results are dropped; any other failure fails the batch
    SkipNotFound,
}

impl JoinPolicy {
    /// Fold the settled results of a batch into a list or a single failure
    pub fn settle<T>(self, results: Vec<Result<T, BrowserError>>) -> Result<Vec<T>, BrowserError> {
        let total = results.len();
        let mut items = Vec::with_capacity(total);
        let mut failed = 0;
        let mut first_failure = None;

        for result in results {
            match result {
                Ok(item) => items.push(item),
                Err(e) if self == JoinPolicy::SkipNotFound && e.is_not_found() => {
                    debug!("Skipping batch item: {}", e);
                }
                Err(e) => {
                    failed += 1;
                    first_failure.get_or_insert(e);
                }
            }
        }

        match first_failure {
            Some(source) => {
                warn!("Batch failed: {} of {} requests failed", failed, total);
                Err(BrowserError::BatchFetch {
                    failed,
                    total,
                    source: Box::new(source),
                })
            }
            None => Ok(items),
        }
    }
}

/// Runs the fetch strategies behind each view
pub struct AggregateFetcher<A: RecipeApi> {
    api: A,
}

impl<A: RecipeApi> AggregateFetcher<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    async fn random_summary(&self) -> Result<RecipeSummary, BrowserError> {
        self.api.random_meal().await?.to_summary()
    }

    async fn summary_by_id(&self, id: &str) -> Result<RecipeSummary, BrowserError> {
        match self.api.lookup_by_id(id).await? {
            Some(meal) => meal.to_summary(),
            None => Err(BrowserError::NotFound(id.to_string())),
        }
    }

    /// `count` random recipes fetched concurrently; all must succeed
    pub async fn fetch_random_batch(
        &self,
        count: usize,
    ) -> Result<Vec<RecipeSummary>, BrowserError> {
        if count == 0 {
            return Err(BrowserError::InvalidArgument(
                "batch size must be at least 1".to_string(),
            ));
        }

        let requests = (0..count).map(|_| self.random_summary());
        let recipes = JoinPolicy::AllOrNothing.settle(join_all(requests).await)?;
        info!("Fetched {} random recipes", recipes.len());
        Ok(recipes)
    }

    /// A single random recipe, as a one-card list
    pub async fn fetch_random_one(&self) -> Result<Vec<RecipeSummary>, BrowserError> {
        Ok(vec![self.random_summary().await?])
    }

    /// Recipes in `category`; an upstream "none" is an empty list
    pub async fn fetch_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<RecipeSummary>, BrowserError> {
        let meals = self.api.filter_by_category(category).await?;
        info!("Category {} has {} recipes", category, meals.len());
        meals.iter().map(|meal| meal.to_summary()).collect()
    }

    /// Recipes whose name matches `term`; rejects a blank term before any request
    pub async fn fetch_by_search_term(
        &self,
        term: &str,
    ) -> Result<Vec<RecipeSummary>, BrowserError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(BrowserError::InvalidArgument(
                "search term cannot be empty".to_string(),
            ));
        }

        let meals = self.api.search_by_name(term).await?;
        info!("Search for {:?} matched {} recipes", term, meals.len());
        meals.iter().map(|meal| meal.to_summary()).collect()
    }

    /// One concurrent lookup per id; ids the upstream no longer knows are dropped
    pub async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<RecipeSummary>, BrowserError> {
        let requests = ids.iter().map(|id| self.summary_by_id(id));
        let recipes = JoinPolicy::SkipNotFound.settle(join_all(requests).await)?;
        if recipes.len() < ids.len() {
            info!(
                "{} of {} ids no longer exist upstream",
                ids.len() - recipes.len(),
                ids.len()
            );
        }
        Ok(recipes)
    }

    pub async fn fetch_detail(&self, id: &str) -> Result<RecipeDetail, BrowserError> {
        match self.api.lookup_by_id(id).await? {
            Some(meal) => meal.to_detail(),
            None => Err(BrowserError::NotFound(id.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MealRecord;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn meal(id: &str) -> MealRecord {
        MealRecord {
            id: Some(id.to_string()),
            name: Some(format!("Meal {}", id)),
            thumbnail: Some(format!("https://img/{}.jpg", id)),
            ..Default::default()
        }
    }

    #[derive(Default)]
    struct StubApi {
        calls: AtomicUsize,
        /// 1-based index of the random call that fails
        fail_random_call: Option<usize>,
        missing: HashSet<String>,
        broken: HashSet<String>,
        delay: Option<Duration>,
    }

    impl StubApi {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn hit(&self) -> usize {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            call
        }
    }

    #[async_trait]
    impl RecipeApi for StubApi {
        async fn random_meal(&self) -> Result<MealRecord, BrowserError> {
            let call = self.hit().await;
            if self.fail_random_call == Some(call) {
                return Err(BrowserError::UpstreamFormat("garbled".to_string()));
            }
            Ok(meal(&call.to_string()))
        }

        async fn filter_by_category(
            &self,
            _category: &str,
        ) -> Result<Vec<MealRecord>, BrowserError> {
            self.hit().await;
            Ok(Vec::new())
        }

        async fn search_by_name(&self, term: &str) -> Result<Vec<MealRecord>, BrowserError> {
            self.hit().await;
            Ok(vec![meal(term)])
        }

        async fn lookup_by_id(&self, id: &str) -> Result<Option<MealRecord>, BrowserError> {
            self.hit().await;
            if self.broken.contains(id) {
                return Err(BrowserError::UpstreamFormat(format!("bad record {}", id)));
            }
            if self.missing.contains(id) {
                return Ok(None);
            }
            Ok(Some(meal(id)))
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_random_batch_all_succeed() {
        let fetcher = AggregateFetcher::new(StubApi::default());
        let recipes = fetcher.fetch_random_batch(8).await.unwrap();
        assert_eq!(recipes.len(), 8);
        assert_eq!(fetcher.api().calls(), 8);
    }

    #[tokio::test]
    async fn test_random_batch_one_failure_fails_batch() {
        let fetcher = AggregateFetcher::new(StubApi {
            fail_random_call: Some(5),
            ..Default::default()
        });

        match fetcher.fetch_random_batch(8).await {
            Err(BrowserError::BatchFetch { failed, total, source }) => {
                assert_eq!(failed, 1);
                assert_eq!(total, 8);
                assert!(matches!(*source, BrowserError::UpstreamFormat(_)));
            }
            other => panic!("Expected BatchFetch error, got {:?}", other),
        }
        // every request still settled
        assert_eq!(fetcher.api().calls(), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_batch_runs_concurrently() {
        let fetcher = AggregateFetcher::new(StubApi {
            delay: Some(Duration::from_millis(100)),
            ..Default::default()
        });

        let started = tokio::time::Instant::now();
        fetcher.fetch_random_batch(8).await.unwrap();
        assert!(started.elapsed() < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_zero_batch_is_invalid() {
        let fetcher = AggregateFetcher::new(StubApi::default());
        assert!(matches!(
            fetcher.fetch_random_batch(0).await,
            Err(BrowserError::InvalidArgument(_))
        ));
        assert_eq!(fetcher.api().calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_category_is_empty_success() {
        let fetcher = AggregateFetcher::new(StubApi::default());
        let recipes = fetcher.fetch_by_category("Seafood").await.unwrap();
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn test_blank_search_term_makes_no_request() {
        let fetcher = AggregateFetcher::new(StubApi::default());
        for term in ["", "   "] {
            assert!(matches!(
                fetcher.fetch_by_search_term(term).await,
                Err(BrowserError::InvalidArgument(_))
            ));
        }
        assert_eq!(fetcher.api().calls(), 0);
    }

    #[tokio::test]
    async fn test_search_term_is_trimmed() {
        let fetcher = AggregateFetcher::new(StubApi::default());
        let recipes = fetcher.fetch_by_search_term("  pie ").await.unwrap();
        assert_eq!(recipes[0].id, "pie");
    }

    #[tokio::test]
    async fn test_fetch_by_ids_skips_not_found() {
        let fetcher = AggregateFetcher::new(StubApi {
            missing: ["B".to_string()].into_iter().collect(),
            ..Default::default()
        });

        let recipes = fetcher.fetch_by_ids(&ids(&["A", "B", "C"])).await.unwrap();
        let found: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(found, vec!["A", "C"]);
        assert_eq!(fetcher.api().calls(), 3);
    }

    #[tokio::test]
    async fn test_fetch_by_ids_other_failure_fails_batch() {
        let fetcher = AggregateFetcher::new(StubApi {
            missing: ["A".to_string()].into_iter().collect(),
            broken: ["C".to_string()].into_iter().collect(),
            ..Default::default()
        });

        assert!(matches!(
            fetcher.fetch_by_ids(&ids(&["A", "B", "C"])).await,
            Err(BrowserError::BatchFetch { failed: 1, total: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_by_ids_empty_list() {
        let fetcher = AggregateFetcher::new(StubApi::default());
        assert!(fetcher.fetch_by_ids(&[]).await.unwrap().is_empty());
        assert_eq!(fetcher.api().calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_detail_not_found() {
        let fetcher = AggregateFetcher::new(StubApi {
            missing: ["404".to_string()].into_iter().collect(),
            ..Default::default()
        });

        assert!(matches!(
            fetcher.fetch_detail("404").await,
            Err(BrowserError::NotFound(id)) if id == "404"
        ));
        assert_eq!(fetcher.fetch_detail("1").await.unwrap().summary.id, "1");
    }

    #[test]
    fn test_all_or_nothing_does_not_skip_not_found() {
        let results: Vec<Result<u8, BrowserError>> =
            vec![Ok(1), Err(BrowserError::NotFound("x".to_string()))];
        assert!(JoinPolicy::AllOrNothing.settle(results).is_err());
    }
}
