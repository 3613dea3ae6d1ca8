//! Favorites & History Tracker: a thin stateful wrapper over the store's
//! favorite and search-history primitives.
//!
//! The favorite-id cache is refreshed from the store after every mutating
//! call. `toggle_favorite` is read-then-branch, which is sound only because the
//! store has a single writer.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::StoreResult;
use crate::models::{Breed, BreedId};
use crate::store::CatalogStore;

/// Number of recent searches surfaced as suggestions by default.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

pub struct FavoritesTracker {
    store: Arc<dyn CatalogStore>,
    favorites: HashSet<BreedId>,
    suggestions: Vec<String>,
    suggestion_limit: usize,
}

impl FavoritesTracker {
    /// Builds a tracker and warms its caches from the store.
    pub async fn load(store: Arc<dyn CatalogStore>, suggestion_limit: usize) -> StoreResult<Self> {
        let mut tracker = Self {
            store,
            favorites: HashSet::new(),
            suggestions: Vec::new(),
            suggestion_limit,
        };
        tracker.refresh().await?;
        Ok(tracker)
    }

    /// Reloads both caches from the store.
    pub async fn refresh(&mut self) -> StoreResult<()> {
        self.refresh_favorites().await?;
        self.refresh_suggestions().await
    }

    async fn refresh_favorites(&mut self) -> StoreResult<()> {
        self.favorites = self.store.favorite_ids().await?.into_iter().collect();
        Ok(())
    }

    async fn refresh_suggestions(&mut self) -> StoreResult<()> {
        self.suggestions = self
            .store
            .list_recent_searches(self.suggestion_limit)
            .await?;
        Ok(())
    }

    /// Flips favorite membership and returns the new state.
    ///
    /// Once the store write succeeds the cache reflects it, even if the
    /// follow-up reload fails.
    pub async fn toggle_favorite(&mut self, id: BreedId) -> StoreResult<bool> {
        let now_favorite = if self.favorites.contains(&id) {
            self.store.remove_favorite(id).await?;
            self.favorites.remove(&id);
            false
        } else {
            self.store.add_favorite(id).await?;
            self.favorites.insert(id);
            true
        };
        if let Err(e) = self.refresh_favorites().await {
            warn!("Could not reload favorites after toggling breed {id}: {e}");
        }
        debug!("Breed {id} favorite = {now_favorite}");
        Ok(now_favorite)
    }

    /// Cache-only membership check.
    pub fn is_favorite(&self, id: BreedId) -> bool {
        self.favorites.contains(&id)
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.len()
    }

    pub async fn favorites(&self) -> StoreResult<Vec<Breed>> {
        self.store.list_favorites().await
    }

    /// Best-effort history write. Store failures are logged, never returned.
    pub async fn record_search(&mut self, query: &str) {
        match self.store.record_search(query).await {
            Ok(true) => {
                if let Err(e) = self.refresh_suggestions().await {
                    warn!("Could not refresh search suggestions: {e}");
                }
            }
            Ok(false) => {}
            Err(e) => warn!("Search history write failed for '{}': {e}", query.trim()),
        }
    }

    pub async fn recent_searches(&self, limit: usize) -> StoreResult<Vec<String>> {
        self.store.list_recent_searches(limit).await
    }

    /// Surfaced recent-search suggestions, most recent first.
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::errors::StoreError;
    use crate::models::breed::fixtures::record;
    use crate::models::{BreedRecord, CategoricalField};
    use crate::store::SqliteCatalogStore;

    /// Delegates to SQLite but can be switched to fail `favorite_ids`.
    struct BrokenReloadStore {
        inner: SqliteCatalogStore,
        fail_reload: AtomicBool,
    }

    #[async_trait]
    impl CatalogStore for BrokenReloadStore {
        async fn insert_breed(&self, record: &BreedRecord) -> StoreResult<BreedId> {
            self.inner.insert_breed(record).await
        }
        async fn update_breed(&self, id: BreedId, record: &BreedRecord) -> StoreResult<bool> {
            self.inner.update_breed(id, record).await
        }
        async fn get_all_breeds(&self) -> StoreResult<Vec<Breed>> {
            self.inner.get_all_breeds().await
        }
        async fn get_breed_by_id(&self, id: BreedId) -> StoreResult<Option<Breed>> {
            self.inner.get_breed_by_id(id).await
        }
        async fn search_breeds(&self, query: &str) -> StoreResult<Vec<Breed>> {
            self.inner.search_breeds(query).await
        }
        async fn breed_count(&self) -> StoreResult<i64> {
            self.inner.breed_count().await
        }
        async fn list_distinct_values(&self, field: CategoricalField) -> StoreResult<Vec<String>> {
            self.inner.list_distinct_values(field).await
        }
        async fn add_favorite(&self, id: BreedId) -> StoreResult<bool> {
            self.inner.add_favorite(id).await
        }
        async fn remove_favorite(&self, id: BreedId) -> StoreResult<bool> {
            self.inner.remove_favorite(id).await
        }
        async fn list_favorites(&self) -> StoreResult<Vec<Breed>> {
            self.inner.list_favorites().await
        }
        async fn favorite_ids(&self) -> StoreResult<Vec<BreedId>> {
            if self.fail_reload.load(Ordering::SeqCst) {
                return Err(StoreError::Corrupt("favorites unavailable".to_string()));
            }
            self.inner.favorite_ids().await
        }
        async fn record_search(&self, query: &str) -> StoreResult<bool> {
            self.inner.record_search(query).await
        }
        async fn list_recent_searches(&self, limit: usize) -> StoreResult<Vec<String>> {
            self.inner.list_recent_searches(limit).await
        }
        async fn clear_all(&self) -> StoreResult<()> {
            self.inner.clear_all().await
        }
        async fn seed_version(&self) -> StoreResult<Option<String>> {
            self.inner.seed_version().await
        }
        async fn set_seed_version(&self, version: &str) -> StoreResult<()> {
            self.inner.set_seed_version(version).await
        }
    }

    async fn tracker_with_breeds(n: usize) -> (FavoritesTracker, Vec<BreedId>) {
        let store = SqliteCatalogStore::open_in_memory().await.unwrap();
        let mut ids = Vec::new();
        for i in 0..n {
            let r = record(&format!("Breed {i}"), "Nowhere", "Calm");
            ids.push(store.insert_breed(&r).await.unwrap());
        }
        let tracker = FavoritesTracker::load(Arc::new(store), DEFAULT_SUGGESTION_LIMIT)
            .await
            .unwrap();
        (tracker, ids)
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_membership() {
        let (mut tracker, ids) = tracker_with_breeds(2).await;
        assert!(!tracker.is_favorite(ids[0]));

        assert!(tracker.toggle_favorite(ids[0]).await.unwrap());
        assert!(tracker.is_favorite(ids[0]));

        assert!(!tracker.toggle_favorite(ids[0]).await.unwrap());
        assert!(!tracker.is_favorite(ids[0]));
        assert_eq!(tracker.favorite_count(), 0);
    }

    #[tokio::test]
    async fn test_favorites_listed_newest_first() {
        let (mut tracker, ids) = tracker_with_breeds(3).await;
        tracker.toggle_favorite(ids[1]).await.unwrap();
        tracker.toggle_favorite(ids[2]).await.unwrap();

        let favorites = tracker.favorites().await.unwrap();
        let listed: Vec<BreedId> = favorites.iter().map(|b| b.id).collect();
        assert_eq!(listed, vec![ids[2], ids[1]]);
    }

    #[tokio::test]
    async fn test_toggle_unknown_breed_leaves_cache_untouched() {
        let (mut tracker, _) = tracker_with_breeds(1).await;
        assert!(tracker.toggle_favorite(404).await.is_err());
        assert!(!tracker.is_favorite(404));
    }

    #[tokio::test]
    async fn test_cache_warmed_from_existing_favorites() {
        let store = Arc::new(SqliteCatalogStore::open_in_memory().await.unwrap());
        let id = store
            .insert_breed(&record("Birman", "Myanmar", "Gentle"))
            .await
            .unwrap();
        store.add_favorite(id).await.unwrap();

        let tracker = FavoritesTracker::load(store, 5).await.unwrap();
        assert!(tracker.is_favorite(id));
    }

    #[tokio::test]
    async fn test_search_history_dedup_and_recency() {
        let (mut tracker, _) = tracker_with_breeds(0).await;
        for q in ["abyssinian", "bengal", "abyssinian"] {
            tracker.record_search(q).await;
        }
        assert_eq!(tracker.suggestions(), ["abyssinian", "bengal"]);
    }

    #[tokio::test]
    async fn test_suggestions_capped_independently_of_history() {
        let (mut tracker, _) = tracker_with_breeds(0).await;
        for i in 0..8 {
            tracker.record_search(&format!("query {i}")).await;
        }
        assert_eq!(tracker.suggestions().len(), DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(tracker.suggestions()[0], "query 7");
        assert_eq!(tracker.recent_searches(20).await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_short_queries_not_recorded() {
        let (mut tracker, _) = tracker_with_breeds(0).await;
        tracker.record_search(" x ").await;
        assert!(tracker.suggestions().is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_is_swallowed() {
        let store = SqliteCatalogStore::open_in_memory().await.unwrap();
        let pool = store.pool().clone();
        let mut tracker = FavoritesTracker::load(Arc::new(store), 5).await.unwrap();

        pool.close().await;
        tracker.record_search("siamese").await;
        assert!(tracker.suggestions().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_keeps_cache_in_step_when_reload_fails() {
        let inner = SqliteCatalogStore::open_in_memory().await.unwrap();
        let id = inner
            .insert_breed(&record("Chartreux", "France", "Quiet"))
            .await
            .unwrap();
        let store = Arc::new(BrokenReloadStore {
            inner,
            fail_reload: AtomicBool::new(false),
        });
        let mut tracker = FavoritesTracker::load(store.clone(), 5).await.unwrap();
        store.fail_reload.store(true, Ordering::SeqCst);

        assert!(tracker.toggle_favorite(id).await.unwrap());
        assert!(tracker.is_favorite(id));
        assert_eq!(store.inner.favorite_ids().await.unwrap(), vec![id]);

        assert!(!tracker.toggle_favorite(id).await.unwrap());
        assert!(!tracker.is_favorite(id));
        assert!(store.inner.favorite_ids().await.unwrap().is_empty());
    }
}
