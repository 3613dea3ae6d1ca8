use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use catalog::config::Config;
use catalog::routes::build_router;
use catalog::seed::{ensure_seeded, seed, Dataset, SeedOutcome};
use catalog::state::AppState;
use catalog::store::{CatalogStore, SqliteCatalogStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("catalog={},tower_http={}", &config.rust_log, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting catalog API v{}", env!("CARGO_PKG_VERSION"));

    // Open the store and bring it up to the bundled dataset
    let store: Arc<dyn CatalogStore> = Arc::new(SqliteCatalogStore::open(&config.database_url).await?);
    let dataset = Dataset::bundled()?;
    if config.force_reseed {
        let report = seed(store.as_ref(), &dataset).await?;
        info!("Forced reseed: {} breeds loaded", report.inserted.len());
    } else {
        match ensure_seeded(store.as_ref(), &dataset).await? {
            SeedOutcome::AlreadySeeded => info!("Catalog up to date (dataset {})", dataset.version),
            SeedOutcome::Reseeded { report, .. } => {
                info!("Catalog seeded: {} breeds loaded", report.inserted.len())
            }
        }
    }

    let state = AppState::load(store, config.clone()).await?;
    info!("Loaded {} breeds into the catalog snapshot", state.catalog.len());

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
