//! Data access collaborators for the recommendation service
//!
//! The rankers never touch storage themselves. They are handed snapshots
//! pulled through these traits, so any backing store (in-memory, SQL, a
//! remote API) can be plugged in without changing ranking code.

use crate::{
    error::AppResult,
    models::{Item, ItemId, NewItem, Rating, UserId},
};

pub mod csv_loader;
pub mod memory;

pub use memory::InMemoryStore;

/// Source of user ratings
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingSource: Send + Sync {
    /// Full snapshot of every rating, in load order
    async fn all_ratings(&self) -> AppResult<Vec<Rating>>;

    /// Ratings made by one user
    async fn ratings_for_user(&self, user_id: UserId) -> AppResult<Vec<Rating>>;
}

/// Source of catalog items
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ItemSource: Send + Sync {
    /// Full catalog snapshot
    async fn all_items(&self) -> AppResult<Vec<Item>>;

    async fn find_by_id(&self, item_id: ItemId) -> AppResult<Option<Item>>;

    /// Items whose title contains `keyword`, ignoring case
    async fn search_titles(&self, keyword: &str) -> AppResult<Vec<Item>>;

    /// Items carrying exactly this tag
    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Item>>;

    /// Adds an item, assigning it the next free id
    async fn insert(&self, item: NewItem) -> AppResult<Item>;
}
