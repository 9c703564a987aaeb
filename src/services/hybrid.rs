//! Hybrid ranking: collaborative candidates spread across the catalog by
//! genre similarity.
//!
//! Every anchor in the collaborative pool is compared against the whole
//! catalog, so one request costs O(pool x catalog). That is fine for catalogs
//! in the tens of thousands; beyond that this is the known scaling limit.

use std::collections::{HashMap, HashSet};

use crate::config::RankingConfig;
use crate::models::{ItemId, Rating, UserId};

use super::collaborative::{top_by_score, CollaborativeRanker};
use super::features::FeatureTable;
use super::similarity::vector_cosine;

/// How many collaborative candidates are drawn per requested result
const CF_OVERSAMPLING: usize = 2;

/// Blends collaborative membership with accumulated content similarity
#[derive(Debug, Clone, Copy)]
pub struct HybridRanker {
    collaborative: CollaborativeRanker,
    cf_weight: f64,
}

impl Default for HybridRanker {
    fn default() -> Self {
        Self::from_config(&RankingConfig::default())
    }
}

impl HybridRanker {
    pub fn new(collaborative: CollaborativeRanker, cf_weight: f64) -> Self {
        Self {
            collaborative,
            cf_weight,
        }
    }

    pub fn from_config(config: &RankingConfig) -> Self {
        Self::new(CollaborativeRanker::from_config(config), config.cf_weight)
    }

    /// Returns up to `top_n` catalog item ids for the target user.
    ///
    /// Each catalog item scores `W * cf + (1 - W) * cb`, where `cf` is 1 for
    /// members of the (oversampled) collaborative pool and `cb` is the sum of
    /// its genre similarity to every pool member. Only items present in the
    /// feature table can be returned.
    pub fn recommend(
        &self,
        ratings: &[Rating],
        features: &FeatureTable,
        target: UserId,
        top_n: usize,
    ) -> Vec<ItemId> {
        if top_n == 0 {
            return Vec::new();
        }

        let pool = self
            .collaborative
            .recommend(ratings, target, top_n.saturating_mul(CF_OVERSAMPLING));
        let content_scores = content_scores(&pool, features);
        let pool: HashSet<ItemId> = pool.into_iter().collect();

        let blended = features.iter().map(|(item_id, _)| {
            let cf = if pool.contains(&item_id) { 1.0 } else { 0.0 };
            let cb = content_scores.get(&item_id).copied().unwrap_or(0.0);
            (item_id, self.cf_weight * cf + (1.0 - self.cf_weight) * cb)
        });

        let ranked = top_by_score(blended, top_n);

        tracing::debug!(
            user_id = target,
            pool = pool.len(),
            catalog = features.len(),
            returned = ranked.len(),
            "Hybrid ranking complete"
        );

        ranked
    }
}

/// Sums each catalog item's similarity to every anchor it is not itself.
/// Anchors missing from the feature table are skipped.
fn content_scores(anchors: &[ItemId], features: &FeatureTable) -> HashMap<ItemId, f64> {
    let mut scores: HashMap<ItemId, f64> = HashMap::new();

    for anchor in anchors {
        let Some(anchor_vector) = features.get(*anchor) else {
            continue;
        };
        for (item_id, vector) in features.iter() {
            if item_id == *anchor {
                continue;
            }
            *scores.entry(item_id).or_insert(0.0) += vector_cosine(anchor_vector, vector);
        }
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Item;

    fn catalog() -> FeatureTable {
        FeatureTable::build(&[
            Item::new(1, "Toy Story (1995)", "Adventure|Animation|Children"),
            Item::new(2, "Jumanji (1995)", "Adventure|Children|Fantasy"),
            Item::new(3, "Heat (1995)", "Action|Crime|Thriller"),
            Item::new(4, "Antz (1998)", "Adventure|Animation|Children"),
            Item::new(5, "Casino (1995)", "Crime|Drama"),
            Item::new(6, "Unlabelled", ""),
        ])
    }

    /// U1 liked 1 and 2; U2 overlaps and also rated 4.
    fn ratings() -> Vec<Rating> {
        vec![
            Rating::new(1, 1, 5.0, 0),
            Rating::new(1, 2, 4.0, 0),
            Rating::new(2, 1, 5.0, 0),
            Rating::new(2, 2, 4.0, 0),
            Rating::new(2, 4, 5.0, 0),
        ]
    }

    #[test]
    fn test_cf_pick_ranks_first() {
        let ranker = HybridRanker::default();
        let ranked = ranker.recommend(&ratings(), &catalog(), 1, 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0], 4);
        // Toy Story shares every genre with Antz, so it leads the content side.
        assert_eq!(ranked[1], 1);
    }

    #[test]
    fn test_never_exceeds_top_n_and_fills_from_catalog() {
        let ranker = HybridRanker::default();
        let features = catalog();
        for top_n in 1..=8 {
            let ranked = ranker.recommend(&ratings(), &features, 1, top_n);
            assert_eq!(ranked.len(), top_n.min(features.len()));
        }
    }

    #[test]
    fn test_results_are_distinct_catalog_items() {
        let ranker = HybridRanker::default();
        let features = catalog();
        let ranked = ranker.recommend(&ratings(), &features, 1, 10);
        let unique: HashSet<ItemId> = ranked.iter().copied().collect();
        assert_eq!(unique.len(), ranked.len());
        assert!(ranked.iter().all(|id| features.contains(*id)));
    }

    #[test]
    fn test_zero_top_n_gets_nothing() {
        let ranker = HybridRanker::default();
        assert!(ranker.recommend(&ratings(), &catalog(), 1, 0).is_empty());
    }

    #[test]
    fn test_empty_catalog_gets_nothing() {
        let ranker = HybridRanker::default();
        let empty = FeatureTable::default();
        assert!(ranker.recommend(&ratings(), &empty, 1, 5).is_empty());
    }

    #[test]
    fn test_unknown_user_falls_back_to_id_order() {
        let ranker = HybridRanker::default();
        assert_eq!(ranker.recommend(&ratings(), &catalog(), 42, 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_pure_content_weight() {
        let ranker = HybridRanker::new(CollaborativeRanker::default(), 0.0);
        let ranked = ranker.recommend(&ratings(), &catalog(), 1, 1);
        // With no weight on membership Antz itself scores 0, and Toy Story
        // (identical genres) wins.
        assert_eq!(ranked, vec![1]);
    }

    #[test]
    fn test_content_scores_accumulate_across_anchors() {
        let features = catalog();
        let scores = content_scores(&[1, 4], &features);
        // Jumanji is 2/3 similar to both anchors.
        assert!((scores[&2] - 4.0 / 3.0).abs() < 1e-12);
        // Anchors still score against each other.
        assert!((scores[&1] - 1.0).abs() < 1e-12);
        assert_eq!(scores[&6], 0.0);
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let ranker = HybridRanker::default();
        let features = catalog();
        assert_eq!(
            ranker.recommend(&ratings(), &features, 1, 4),
            ranker.recommend(&ratings(), &features, 1, 4)
        );
    }
}
