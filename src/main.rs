use std::sync::Arc;

use recommender_api::{
    api::{create_router, AppState},
    config::Config,
    data::{csv_loader, InMemoryStore},
    error::{AppError, AppResult},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recommender_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Catalog and ratings are loaded once; the feature table is built before serving
    let items = or_empty_if_missing(csv_loader::load_items_from_path(&config.movies_path))?;
    let ratings = or_empty_if_missing(csv_loader::load_ratings_from_path(&config.ratings_path))?;

    let store = Arc::new(InMemoryStore::new(items, ratings));
    let state = AppState::new(
        store.clone(),
        store,
        config.ranking(),
        config.default_top_n,
    )
    .await?;

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}

/// A missing data file starts the service with an empty data set
fn or_empty_if_missing<T>(result: AppResult<Vec<T>>) -> AppResult<Vec<T>> {
    match result {
        Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(error = %e, "Data file not found, starting empty");
            Ok(Vec::new())
        }
        other => other,
    }
}
