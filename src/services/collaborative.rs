//! User-based collaborative filtering.
//!
//! Ratings are regrouped per request; nothing here is cached between calls.
//! Cost is roughly O(users x items per user) per request, which suits batch
//! style use rather than high-QPS serving.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::RankingConfig;
use crate::models::{ItemId, Rating, UserId};

use super::similarity::rating_cosine;

/// How repeated (user, item) ratings are folded into one score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The rating that comes later in the input replaces earlier ones
    #[default]
    KeepLast,
    /// Scores of repeated ratings are added together
    Sum,
}

/// Per-user rating maps (item -> score) derived from a flat rating list
///
/// Ordered maps keep similarity sums and neighbor scans in a fixed order, so
/// identical input always ranks identically.
#[derive(Debug, Clone, Default)]
pub struct UserRatings {
    by_user: BTreeMap<UserId, BTreeMap<ItemId, f64>>,
}

impl UserRatings {
    /// Groups ratings by user, folding duplicates according to `policy`
    pub fn group(ratings: &[Rating], policy: DuplicatePolicy) -> Self {
        let by_user = ratings.iter().fold(
            BTreeMap::<UserId, BTreeMap<ItemId, f64>>::new(),
            |mut acc, rating| {
                let items = acc.entry(rating.user_id).or_default();
                match policy {
                    DuplicatePolicy::KeepLast => {
                        items.insert(rating.item_id, rating.score);
                    }
                    DuplicatePolicy::Sum => {
                        *items.entry(rating.item_id).or_insert(0.0) += rating.score;
                    }
                }
                acc
            },
        );

        Self { by_user }
    }

    pub fn get(&self, user_id: UserId) -> Option<&BTreeMap<ItemId, f64>> {
        self.by_user.get(&user_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (UserId, &BTreeMap<ItemId, f64>)> {
        self.by_user.iter().map(|(id, items)| (*id, items))
    }

    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }
}

/// Another user selected for rating similarly to the target user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub user_id: UserId,
    pub similarity: f64,
}

/// Ranks unseen items by the weighted ratings of the most similar users
#[derive(Debug, Clone, Copy)]
pub struct CollaborativeRanker {
    neighbor_count: usize,
    duplicates: DuplicatePolicy,
}

impl Default for CollaborativeRanker {
    fn default() -> Self {
        Self::from_config(&RankingConfig::default())
    }
}

impl CollaborativeRanker {
    pub fn new(neighbor_count: usize, duplicates: DuplicatePolicy) -> Self {
        Self {
            neighbor_count,
            duplicates,
        }
    }

    pub fn from_config(config: &RankingConfig) -> Self {
        Self::new(config.neighbor_count, config.duplicate_ratings)
    }

    /// Returns up to `top_n` item ids the target user has not rated yet.
    ///
    /// An unknown user or `top_n == 0` gives an empty list. Fewer than
    /// `top_n` candidates are returned as-is, without padding.
    pub fn recommend(&self, ratings: &[Rating], target: UserId, top_n: usize) -> Vec<ItemId> {
        if top_n == 0 {
            return Vec::new();
        }

        let users = UserRatings::group(ratings, self.duplicates);
        let Some(target_ratings) = users.get(target) else {
            tracing::debug!(user_id = target, "No ratings for user");
            return Vec::new();
        };

        let neighbors = self.nearest_neighbors(&users, target);
        let candidates = score_candidates(&users, target_ratings, &neighbors);

        tracing::debug!(
            user_id = target,
            users = users.user_count(),
            neighbors = neighbors.len(),
            candidates = candidates.len(),
            "Collaborative candidates scored"
        );

        top_by_score(candidates, top_n)
    }

    /// Selects the `neighbor_count` users most similar to `target`.
    ///
    /// Ordered by similarity descending, then user id ascending. Users with
    /// zero similarity still qualify when there are not enough closer ones.
    pub fn nearest_neighbors(&self, users: &UserRatings, target: UserId) -> Vec<Neighbor> {
        let Some(target_ratings) = users.get(target) else {
            return Vec::new();
        };

        let mut neighbors: Vec<Neighbor> = users
            .iter()
            .filter(|(user_id, _)| *user_id != target)
            .map(|(user_id, items)| Neighbor {
                user_id,
                similarity: rating_cosine(target_ratings, items),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        neighbors.truncate(self.neighbor_count);
        neighbors
    }
}

/// Sums `similarity * rating` across neighbors for every item the target
/// user has not rated.
fn score_candidates(
    users: &UserRatings,
    seen: &BTreeMap<ItemId, f64>,
    neighbors: &[Neighbor],
) -> HashMap<ItemId, f64> {
    let mut scores: HashMap<ItemId, f64> = HashMap::new();

    for neighbor in neighbors {
        let Some(items) = users.get(neighbor.user_id) else {
            continue;
        };
        for (item_id, score) in items {
            if !seen.contains_key(item_id) {
                *scores.entry(*item_id).or_insert(0.0) += neighbor.similarity * score;
            }
        }
    }

    scores
}

/// Orders scored items by score descending, then id ascending, keeping `top_n`
pub(crate) fn top_by_score(
    scores: impl IntoIterator<Item = (ItemId, f64)>,
    top_n: usize,
) -> Vec<ItemId> {
    let mut ranked: Vec<(ItemId, f64)> = scores.into_iter().collect();
    ranked.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        other => other,
    });
    ranked.into_iter().take(top_n).map(|(id, _)| id).collect()
}
