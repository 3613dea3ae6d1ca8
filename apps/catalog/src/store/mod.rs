//! Catalog Store: durable home for breed records, favorites and search history.
//!
//! The store carries no business logic. Consumers receive an explicitly
//! constructed store as `Arc<dyn CatalogStore>`; tests build a fresh in-memory
//! store per case.

pub mod sqlite;

use async_trait::async_trait;

use crate::errors::StoreResult;
use crate::models::{Breed, BreedId, BreedRecord, CategoricalField};

pub use sqlite::SqliteCatalogStore;

/// Maximum number of search-history entries retained.
pub const HISTORY_CAP: usize = 20;

/// Queries shorter than this (in characters, after trimming) are never recorded.
pub const MIN_QUERY_CHARS: usize = 2;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    // --- Breeds ---

    /// Validates and inserts a record, returning the newly assigned id.
    async fn insert_breed(&self, record: &BreedRecord) -> StoreResult<BreedId>;

    /// Validated full replacement. Returns false when no breed has this id.
    async fn update_breed(&self, id: BreedId, record: &BreedRecord) -> StoreResult<bool>;

    /// All breeds ordered by name ascending.
    async fn get_all_breeds(&self) -> StoreResult<Vec<Breed>>;

    async fn get_breed_by_id(&self, id: BreedId) -> StoreResult<Option<Breed>>;

    /// Case-insensitive substring match over name, origin, temperament, coat
    /// pattern and health notes. A blank query returns the whole catalog.
    async fn search_breeds(&self, query: &str) -> StoreResult<Vec<Breed>>;

    async fn breed_count(&self) -> StoreResult<i64>;

    async fn list_distinct_values(&self, field: CategoricalField) -> StoreResult<Vec<String>>;

    // --- Favorites ---

    /// Returns true when the breed was not already a favorite.
    async fn add_favorite(&self, id: BreedId) -> StoreResult<bool>;

    /// Returns true when a favorite was actually removed.
    async fn remove_favorite(&self, id: BreedId) -> StoreResult<bool>;

    /// Favorited breeds, most recently favorited first.
    async fn list_favorites(&self) -> StoreResult<Vec<Breed>>;

    async fn favorite_ids(&self) -> StoreResult<Vec<BreedId>>;

    // --- Search history ---

    /// Records a trimmed query as the most recent search, dropping any older
    /// occurrence and pruning beyond [`HISTORY_CAP`]. Returns false when the
    /// query is too short to record.
    async fn record_search(&self, query: &str) -> StoreResult<bool>;

    /// Most recent first.
    async fn list_recent_searches(&self, limit: usize) -> StoreResult<Vec<String>>;

    // --- Seeding support ---

    /// Deletes every breed, favorite and history entry.
    async fn clear_all(&self) -> StoreResult<()>;

    async fn seed_version(&self) -> StoreResult<Option<String>>;

    async fn set_seed_version(&self, version: &str) -> StoreResult<()>;
}
