use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::errors::StoreResult;
use crate::models::Breed;
use crate::quiz::QuizEngine;
use crate::store::CatalogStore;
use crate::tracker::FavoritesTracker;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    /// Read-only snapshot taken after seeding; the query engine runs over this.
    pub catalog: Arc<Vec<Breed>>,
    pub tracker: Arc<Mutex<FavoritesTracker>>,
    /// The single local quiz session.
    pub quiz: Arc<Mutex<QuizEngine>>,
    pub config: Config,
}

impl AppState {
    /// Loads the catalog snapshot and tracker caches from an already seeded store.
    pub async fn load(store: Arc<dyn CatalogStore>, config: Config) -> StoreResult<Self> {
        let catalog = store.get_all_breeds().await?;
        let tracker = FavoritesTracker::load(store.clone(), config.suggestion_limit).await?;
        Ok(Self {
            store,
            catalog: Arc::new(catalog),
            tracker: Arc::new(Mutex::new(tracker)),
            quiz: Arc::new(Mutex::new(QuizEngine::new())),
            config,
        })
    }
}
