use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::{
    config::RankingConfig,
    data::{ItemSource, RatingSource},
    error::{AppError, AppResult},
    models::{ItemId, UserId},
};

use super::{collaborative::CollaborativeRanker, features::FeatureTable, hybrid::HybridRanker};

/// Generates personalized recommendations
///
/// Ratings are pulled fresh from the [`RatingSource`] on every call. The
/// genre feature table is built once at warm-up and shared read-only between
/// requests; [`RecommendationService::rebuild_features`] replaces it as a
/// whole when the catalog changes.
pub struct RecommendationService {
    ratings: Arc<dyn RatingSource>,
    features: RwLock<Arc<FeatureTable>>,
    /// Serializes rebuilds so an older catalog snapshot never replaces a newer one
    rebuild: Mutex<()>,
    collaborative: CollaborativeRanker,
    hybrid: HybridRanker,
}

impl RecommendationService {
    /// Creates the service and builds the feature table from the current catalog
    pub async fn warm_up(
        ratings: Arc<dyn RatingSource>,
        items: &dyn ItemSource,
        config: RankingConfig,
    ) -> AppResult<Self> {
        let features = FeatureTable::build(&items.all_items().await?);
        Ok(Self::new(ratings, Arc::new(features), config))
    }

    /// Creates the service over an already built feature table
    pub fn new(
        ratings: Arc<dyn RatingSource>,
        features: Arc<FeatureTable>,
        config: RankingConfig,
    ) -> Self {
        Self {
            ratings,
            features: RwLock::new(features),
            rebuild: Mutex::new(()),
            collaborative: CollaborativeRanker::from_config(&config),
            hybrid: HybridRanker::from_config(&config),
        }
    }

    /// Collaborative-filtering recommendations.
    ///
    /// A non-positive `top_n` yields an empty list.
    pub async fn recommend(&self, user_id: UserId, top_n: i64) -> AppResult<Vec<ItemId>> {
        let Some(top_n) = positive(top_n) else {
            return Ok(Vec::new());
        };
        let ratings = self.ratings.all_ratings().await?;
        Ok(self.collaborative.recommend(&ratings, user_id, top_n))
    }

    /// Hybrid collaborative + content-based recommendations.
    ///
    /// A non-positive `top_n` yields an empty list.
    pub async fn recommend_hybrid(&self, user_id: UserId, top_n: i64) -> AppResult<Vec<ItemId>> {
        let Some(top_n) = positive(top_n) else {
            return Ok(Vec::new());
        };
        let ratings = self.ratings.all_ratings().await?;
        let features = self.features()?;
        Ok(self.hybrid.recommend(&ratings, &features, user_id, top_n))
    }

    /// Current feature table snapshot
    pub fn features(&self) -> AppResult<Arc<FeatureTable>> {
        self.features
            .read()
            .map(|guard| Arc::clone(&*guard))
            .map_err(|_| AppError::Internal("Feature table lock poisoned".to_string()))
    }

    /// Rebuilds the vocabulary and every vector from the catalog, then swaps
    /// the new table in. Requests already running keep the old snapshot.
    pub async fn rebuild_features(&self, items: &dyn ItemSource) -> AppResult<()> {
        // Held across the catalog read and the swap; rebuilds finish in order
        let _rebuild = self.rebuild.lock().await;
        let table = Arc::new(FeatureTable::build(&items.all_items().await?));
        let mut guard = self
            .features
            .write()
            .map_err(|_| AppError::Internal("Feature table lock poisoned".to_string()))?;
        *guard = table;
        Ok(())
    }
}

fn positive(top_n: i64) -> Option<usize> {
    usize::try_from(top_n).ok().filter(|n| *n > 0)
}
