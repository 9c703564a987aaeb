use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemId, UserId};

/// A single user/item interaction as loaded from the rating store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    /// Observed range is 0-5 but it is not enforced
    pub score: f64,
    /// Seconds since the Unix epoch
    pub timestamp: i64,
}

impl Rating {
    /// Creates a new rating
    pub fn new(user_id: UserId, item_id: ItemId, score: f64, timestamp: i64) -> Self {
        Self {
            user_id,
            item_id,
            score,
            timestamp,
        }
    }

    /// Returns the rating time, or `None` if the timestamp is out of range
    pub fn rated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Rating as returned to API clients
#[derive(Debug, Clone, Serialize)]
pub struct UserRatingResponse {
    pub item_id: ItemId,
    pub score: f64,
    pub rated_at: Option<DateTime<Utc>>,
}

impl From<&Rating> for UserRatingResponse {
    fn from(rating: &Rating) -> Self {
        Self {
            item_id: rating.item_id,
            score: rating.score,
            rated_at: rating.rated_at(),
        }
    }
}
