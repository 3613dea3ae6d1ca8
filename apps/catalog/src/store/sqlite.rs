use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{Sqlite, SqliteArguments};
use sqlx::SqlitePool;
use tracing::debug;

use crate::db;
use crate::errors::{StoreError, StoreResult};
use crate::models::breed::{BreedRow, UnknownVariant};
use crate::models::{
    BodyType, Breed, BreedId, BreedRecord, CategoricalField, CoatLength, Level,
};
use crate::store::{CatalogStore, HISTORY_CAP, MIN_QUERY_CHARS};

const SEED_VERSION_KEY: &str = "seed_version";

const INSERT_BREED: &str = r#"
    INSERT INTO breeds
        (code, name, origin, coat_length, coat_pattern, body_type, temperament,
         activity_level, grooming_needs, health_notes, lifespan_min, lifespan_max,
         weight_female_min, weight_female_max, weight_male_min, weight_male_max,
         description, care_notes, ideal_for, personality_energy,
         personality_friendliness, personality_intelligence, image_key)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

const UPDATE_BREED: &str = r#"
    UPDATE breeds SET
        code = ?, name = ?, origin = ?, coat_length = ?, coat_pattern = ?,
        body_type = ?, temperament = ?, activity_level = ?, grooming_needs = ?,
        health_notes = ?, lifespan_min = ?, lifespan_max = ?,
        weight_female_min = ?, weight_female_max = ?, weight_male_min = ?,
        weight_male_max = ?, description = ?, care_notes = ?, ideal_for = ?,
        personality_energy = ?, personality_friendliness = ?,
        personality_intelligence = ?, image_key = ?
    WHERE id = ?
"#;

/// SQLite-backed [`CatalogStore`].
#[derive(Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and applies migrations.
    pub async fn open(database_url: &str) -> StoreResult<Self> {
        Ok(Self::new(db::connect(database_url).await?))
    }

    /// A private, empty store that lives as long as the returned value.
    pub async fn open_in_memory() -> StoreResult<Self> {
        Self::open(db::IN_MEMORY_URL).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_breeds<'a>(
        &self,
        query: QueryAs<'a, Sqlite, BreedRow, SqliteArguments<'a>>,
    ) -> StoreResult<Vec<Breed>> {
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(BreedRow::into_domain).collect()
    }
}

fn bind_record<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    r: &'q BreedRecord,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    query
        .bind(r.code.as_deref())
        .bind(r.name.as_str())
        .bind(r.origin.as_str())
        .bind(r.coat_length.as_str())
        .bind(r.coat_pattern.as_deref())
        .bind(r.body_type.as_str())
        .bind(r.temperament.as_str())
        .bind(r.activity_level.as_str())
        .bind(r.grooming_needs.as_str())
        .bind(r.health_notes.as_deref())
        .bind(i64::from(r.lifespan.min))
        .bind(i64::from(r.lifespan.max))
        .bind(r.weight_female.min)
        .bind(r.weight_female.max)
        .bind(r.weight_male.min)
        .bind(r.weight_male.max)
        .bind(r.description.as_str())
        .bind(r.care_notes.as_deref())
        .bind(r.ideal_for.as_deref())
        .bind(r.personality.map(|p| i64::from(p.energy)))
        .bind(r.personality.map(|p| i64::from(p.friendliness)))
        .bind(r.personality.map(|p| i64::from(p.intelligence)))
        .bind(r.image_key.as_str())
}

/// Orders enum storage keys by the enum's natural order rather than alphabetically.
fn sort_by_rank<T>(values: Vec<String>) -> StoreResult<Vec<String>>
where
    T: FromStr<Err = UnknownVariant> + Ord,
{
    let mut ranked = values
        .into_iter()
        .map(|v| {
            v.parse::<T>()
                .map(|rank| (rank, v))
                .map_err(|e| StoreError::Corrupt(e.to_string()))
        })
        .collect::<StoreResult<Vec<_>>>()?;
    ranked.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(ranked.into_iter().map(|(_, v)| v).collect())
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn insert_breed(&self, record: &BreedRecord) -> StoreResult<BreedId> {
        record.validate()?;
        let result = bind_record(sqlx::query(INSERT_BREED), record)
            .execute(&self.pool)
            .await?;
        let id = result.last_insert_rowid();
        debug!("Inserted breed {id} ({})", record.name);
        Ok(id)
    }

    async fn update_breed(&self, id: BreedId, record: &BreedRecord) -> StoreResult<bool> {
        record.validate()?;
        let result = bind_record(sqlx::query(UPDATE_BREED), record)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_all_breeds(&self) -> StoreResult<Vec<Breed>> {
        self.fetch_breeds(sqlx::query_as(
            "SELECT * FROM breeds ORDER BY name COLLATE NOCASE, name, id",
        ))
        .await
    }

    async fn get_breed_by_id(&self, id: BreedId) -> StoreResult<Option<Breed>> {
        let row: Option<BreedRow> = sqlx::query_as("SELECT * FROM breeds WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(BreedRow::into_domain).transpose()
    }

    async fn search_breeds(&self, query: &str) -> StoreResult<Vec<Breed>> {
        // SQLite's lower() folds ASCII only, so matching happens here.
        let needle = query.trim().to_lowercase();
        let breeds = self.get_all_breeds().await?;
        if needle.is_empty() {
            return Ok(breeds);
        }
        Ok(breeds
            .into_iter()
            .filter(|b| b.record.matches_search_text(&needle))
            .collect())
    }

    async fn breed_count(&self) -> StoreResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM breeds")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn list_distinct_values(&self, field: CategoricalField) -> StoreResult<Vec<String>> {
        let column = field.column();
        let sql = format!("SELECT DISTINCT {column} FROM breeds ORDER BY {column} COLLATE BINARY");
        let values: Vec<String> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;

        match field {
            CategoricalField::Origin => Ok(values),
            CategoricalField::CoatLength => sort_by_rank::<CoatLength>(values),
            CategoricalField::BodyType => sort_by_rank::<BodyType>(values),
            CategoricalField::ActivityLevel | CategoricalField::GroomingNeeds => {
                sort_by_rank::<Level>(values)
            }
        }
    }

    async fn add_favorite(&self, id: BreedId) -> StoreResult<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM breeds WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if exists == 0 {
            return Err(StoreError::UnknownBreed(id));
        }

        let result =
            sqlx::query("INSERT OR IGNORE INTO favorites (breed_id, created_at) VALUES (?, ?)")
                .bind(id)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn remove_favorite(&self, id: BreedId) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE breed_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_favorites(&self) -> StoreResult<Vec<Breed>> {
        self.fetch_breeds(sqlx::query_as(
            r#"
            SELECT breeds.*
            FROM favorites
            JOIN breeds ON breeds.id = favorites.breed_id
            ORDER BY favorites.created_at DESC, favorites.id DESC
            "#,
        ))
        .await
    }

    async fn favorite_ids(&self) -> StoreResult<Vec<BreedId>> {
        Ok(sqlx::query_scalar(
            "SELECT breed_id FROM favorites ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn record_search(&self, query: &str) -> StoreResult<bool> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(false);
        }

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM search_history WHERE query = ?")
            .bind(query)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO search_history (query, searched_at) VALUES (?, ?)")
            .bind(query)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            DELETE FROM search_history
            WHERE id NOT IN (SELECT id FROM search_history ORDER BY id DESC LIMIT ?)
            "#,
        )
        .bind(HISTORY_CAP as i64)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn list_recent_searches(&self, limit: usize) -> StoreResult<Vec<String>> {
        Ok(
            sqlx::query_scalar("SELECT query FROM search_history ORDER BY id DESC LIMIT ?")
                .bind(limit as i64)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn clear_all(&self) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM favorites")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM search_history")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM breeds").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn seed_version(&self) -> StoreResult<Option<String>> {
        Ok(
            sqlx::query_scalar("SELECT value FROM catalog_meta WHERE key = ?")
                .bind(SEED_VERSION_KEY)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn set_seed_version(&self, version: &str) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO catalog_meta (key, value) VALUES (?, ?)
            ON CONFLICT (key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(SEED_VERSION_KEY)
        .bind(version)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
