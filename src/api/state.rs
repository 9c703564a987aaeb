use std::sync::Arc;

use crate::{
    config::RankingConfig,
    data::{InMemoryStore, ItemSource, RatingSource},
    error::AppResult,
    models::{Item, Rating},
    services::RecommendationService,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recommendations: Arc<RecommendationService>,
    pub items: Arc<dyn ItemSource>,
    pub ratings: Arc<dyn RatingSource>,
    /// Used when a recommendation request has no `top` parameter
    pub default_top_n: i64,
}

impl AppState {
    /// Wires the service over the given data sources and builds the feature table
    pub async fn new(
        items: Arc<dyn ItemSource>,
        ratings: Arc<dyn RatingSource>,
        ranking: RankingConfig,
        default_top_n: i64,
    ) -> AppResult<Self> {
        let recommendations =
            RecommendationService::warm_up(ratings.clone(), items.as_ref(), ranking).await?;

        Ok(Self {
            recommendations: Arc::new(recommendations),
            items,
            ratings,
            default_top_n,
        })
    }

    /// State backed by an [`InMemoryStore`] over already loaded data
    pub async fn in_memory(
        items: Vec<Item>,
        ratings: Vec<Rating>,
        ranking: RankingConfig,
        default_top_n: i64,
    ) -> AppResult<Self> {
        let store = Arc::new(InMemoryStore::new(items, ratings));
        Self::new(store.clone(), store, ranking, default_top_n).await
    }
}
