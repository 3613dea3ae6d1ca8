use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::StoreResult;

pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Creates the SQLite connection pool backing the catalog store.
///
/// The store has a single writer, so the pool holds exactly one connection. This
/// also keeps a `sqlite::memory:` database alive for the lifetime of the pool.
pub async fn create_pool(database_url: &str) -> StoreResult<SqlitePool> {
    info!("Opening SQLite catalog at {database_url}");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    info!("SQLite connection pool established");
    Ok(pool)
}

/// Applies the bundled schema migrations.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    info!("Running catalog migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Catalog migrations complete");
    Ok(())
}

/// Opens a pool and brings its schema up to date.
pub async fn connect(database_url: &str) -> StoreResult<SqlitePool> {
    let pool = create_pool(database_url).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
