//! Seeder: brings the catalog store to a known state from a static dataset.
//!
//! `seed` is destructive: it clears breeds, favorites and search history, then
//! inserts every record in dataset order. A record that fails to insert is
//! reported and skipped; the rest still load.
//!
//! `ensure_seeded` is the startup path. It does nothing when the stored seed
//! version matches the dataset, and otherwise reseeds while carrying favorites
//! (matched by breed name) and search history across.

pub mod dataset;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::StoreResult;
use crate::models::BreedId;
use crate::store::{CatalogStore, HISTORY_CAP};

pub use dataset::Dataset;

#[derive(Debug, Clone, Serialize)]
pub struct SeedFailure {
    /// Zero-based position in the dataset.
    pub position: usize,
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub inserted: Vec<BreedId>,
    pub failures: Vec<SeedFailure>,
}

impl SeedReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SeedOutcome {
    AlreadySeeded,
    Reseeded {
        report: SeedReport,
        restored_favorites: usize,
        restored_searches: usize,
    },
}

/// Clears the store and loads `dataset` into it.
pub async fn seed(store: &dyn CatalogStore, dataset: &Dataset) -> StoreResult<SeedReport> {
    info!(
        "Seeding catalog with {} breeds (dataset {})",
        dataset.breeds.len(),
        dataset.version
    );
    store.clear_all().await?;

    let mut report = SeedReport::default();
    for (position, record) in dataset.breeds.iter().enumerate() {
        match store.insert_breed(record).await {
            Ok(id) => report.inserted.push(id),
            Err(e) => {
                warn!("Skipping breed #{position} '{}': {e}", record.name);
                report.failures.push(SeedFailure {
                    position,
                    name: record.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    store.set_seed_version(&dataset.version).await?;
    info!(
        "Seeding complete: {} inserted, {} failed",
        report.inserted.len(),
        report.failures.len()
    );
    Ok(report)
}

/// Seeds only when the store is empty or holds a different dataset version.
pub async fn ensure_seeded(
    store: &dyn CatalogStore,
    dataset: &Dataset,
) -> StoreResult<SeedOutcome> {
    let stored_version = store.seed_version().await?;
    let current = stored_version.as_deref() == Some(dataset.version.as_str());
    if current && store.breed_count().await? > 0 {
        debug!("Catalog already at dataset version {}", dataset.version);
        return Ok(SeedOutcome::AlreadySeeded);
    }

    // Newest first from the store; replayed oldest first to keep recency order.
    let favorite_names: Vec<String> = store
        .list_favorites()
        .await?
        .into_iter()
        .map(|b| b.record.name.to_lowercase())
        .collect();
    let searches = store.list_recent_searches(HISTORY_CAP).await?;

    let report = seed(store, dataset).await?;

    let catalog = store.get_all_breeds().await?;
    let mut restored_favorites = 0;
    for name in favorite_names.iter().rev() {
        match catalog.iter().find(|b| b.record.name.to_lowercase() == *name) {
            Some(breed) => {
                if store.add_favorite(breed.id).await? {
                    restored_favorites += 1;
                }
            }
            None => debug!("Favorite '{name}' no longer in catalog; dropped"),
        }
    }

    let mut restored_searches = 0;
    for query in searches.iter().rev() {
        if store.record_search(query).await? {
            restored_searches += 1;
        }
    }

    info!(
        "Reseeded from version {:?} to {}; restored {restored_favorites} favorites and {restored_searches} searches",
        stored_version, dataset.version
    );
    Ok(SeedOutcome::Reseeded {
        report,
        restored_favorites,
        restored_searches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::breed::fixtures::record;
    use crate::models::{Bounds, BreedRecord};
    use crate::store::SqliteCatalogStore;

    fn three_breeds() -> Dataset {
        Dataset::new(
            "test-1",
            vec![
                record("Siamese", "Thailand", "Vocal, Social"),
                record("Bengal", "United States", "Energetic, Playful"),
                record("Abyssinian", "Ethiopia", "Active, Curious"),
            ],
        )
    }

    fn names(breeds: &[crate::models::Breed]) -> Vec<&str> {
        breeds.iter().map(|b| b.name()).collect()
    }

    #[tokio::test]
    async fn test_end_to_end_seed_and_favorite() {
        let store = SqliteCatalogStore::open_in_memory().await.unwrap();
        let report = seed(&store, &three_breeds()).await.unwrap();
        assert_eq!(report.inserted, vec![1, 2, 3]);
        assert!(report.is_complete());

        let all = store.get_all_breeds().await.unwrap();
        assert_eq!(names(&all), vec!["Abyssinian", "Bengal", "Siamese"]);

        store.add_favorite(2).await.unwrap();
        let favorites = store.list_favorites().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, 2);
        assert_eq!(favorites[0].name(), "Bengal");

        store.remove_favorite(2).await.unwrap();
        assert!(store.list_favorites().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_record_is_reported_and_skipped() {
        let mut broken: BreedRecord = record("Broken", "Nowhere", "Odd");
        broken.weight_female = Bounds::new(5.0, 2.0);
        let dataset = Dataset::new(
            "test-2",
            vec![
                record("Siamese", "Thailand", "Vocal"),
                broken,
                record("Bengal", "United States", "Energetic"),
            ],
        );
        let store = SqliteCatalogStore::open_in_memory().await.unwrap();

        let report = seed(&store, &dataset).await.unwrap();
        assert_eq!(report.inserted.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].position, 1);
        assert_eq!(report.failures[0].name, "Broken");
        assert_eq!(store.breed_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_reseed_is_destructive_and_reproducible() {
        let store = SqliteCatalogStore::open_in_memory().await.unwrap();
        let dataset = three_breeds();
        seed(&store, &dataset).await.unwrap();
        store.add_favorite(1).await.unwrap();
        store.record_search("bengal").await.unwrap();

        seed(&store, &dataset).await.unwrap();
        assert!(store.list_favorites().await.unwrap().is_empty());
        assert!(store.list_recent_searches(5).await.unwrap().is_empty());
        assert_eq!(
            names(&store.get_all_breeds().await.unwrap()),
            vec!["Abyssinian", "Bengal", "Siamese"]
        );
        assert_eq!(store.seed_version().await.unwrap().as_deref(), Some("test-1"));
    }

    #[tokio::test]
    async fn test_ensure_seeded_seeds_empty_store() {
        let store = SqliteCatalogStore::open_in_memory().await.unwrap();
        let outcome = ensure_seeded(&store, &three_breeds()).await.unwrap();
        assert!(matches!(outcome, SeedOutcome::Reseeded { .. }));
        assert_eq!(store.breed_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_ensure_seeded_is_noop_on_same_version() {
        let store = SqliteCatalogStore::open_in_memory().await.unwrap();
        let dataset = three_breeds();
        ensure_seeded(&store, &dataset).await.unwrap();
        store.add_favorite(3).await.unwrap();

        let outcome = ensure_seeded(&store, &dataset).await.unwrap();
        assert!(matches!(outcome, SeedOutcome::AlreadySeeded));
        assert_eq!(store.favorite_ids().await.unwrap(), vec![3]);
    }

    #[tokio::test]
    async fn test_version_change_keeps_favorites_by_name() {
        let store = SqliteCatalogStore::open_in_memory().await.unwrap();
        ensure_seeded(&store, &three_breeds()).await.unwrap();
        store.add_favorite(1).await.unwrap(); // Siamese
        store.add_favorite(2).await.unwrap(); // Bengal
        store.record_search("siamese").await.unwrap();

        let upgraded = Dataset::new(
            "test-2",
            vec![
                record("Bengal", "United States", "Energetic, Playful"),
                record("Persian", "Iran", "Calm"),
            ],
        );
        let outcome = ensure_seeded(&store, &upgraded).await.unwrap();
        let SeedOutcome::Reseeded {
            restored_favorites,
            restored_searches,
            ..
        } = outcome
        else {
            panic!("expected a reseed");
        };
        assert_eq!(restored_favorites, 1);
        assert_eq!(restored_searches, 1);

        let favorites = store.list_favorites().await.unwrap();
        assert_eq!(names(&favorites), vec!["Bengal"]);
        assert_eq!(store.list_recent_searches(5).await.unwrap(), vec!["siamese"]);
    }

    #[tokio::test]
    async fn test_bundled_dataset_seeds_cleanly() {
        let store = SqliteCatalogStore::open_in_memory().await.unwrap();
        let dataset = Dataset::bundled().unwrap();
        let report = seed(&store, &dataset).await.unwrap();
        assert!(report.is_complete());
        assert_eq!(store.breed_count().await.unwrap(), dataset.breeds.len() as i64);
    }
}
