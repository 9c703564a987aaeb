use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{Item, ItemId, NewItem, Rating, UserId},
};

use super::{ItemSource, RatingSource};

/// Catalog and rating store held entirely in memory
///
/// Ratings are fixed after construction. Items can be appended through
/// [`ItemSource::insert`].
pub struct InMemoryStore {
    items: RwLock<Vec<Item>>,
    ratings: Vec<Rating>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl InMemoryStore {
    /// Creates a store over already loaded data
    pub fn new(items: Vec<Item>, ratings: Vec<Rating>) -> Self {
        Self {
            items: RwLock::new(items),
            ratings,
        }
    }
}

#[async_trait::async_trait]
impl RatingSource for InMemoryStore {
    async fn all_ratings(&self) -> AppResult<Vec<Rating>> {
        Ok(self.ratings.clone())
    }

    async fn ratings_for_user(&self, user_id: UserId) -> AppResult<Vec<Rating>> {
        Ok(self
            .ratings
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl ItemSource for InMemoryStore {
    async fn all_items(&self) -> AppResult<Vec<Item>> {
        Ok(self.items.read().await.clone())
    }

    async fn find_by_id(&self, item_id: ItemId) -> AppResult<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|i| i.id == item_id).cloned())
    }

    async fn search_titles(&self, keyword: &str) -> AppResult<Vec<Item>> {
        let needle = keyword.to_lowercase();
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|i| i.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_tag(&self, tag: &str) -> AppResult<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|i| i.has_tag(tag)).cloned().collect())
    }

    async fn insert(&self, item: NewItem) -> AppResult<Item> {
        let mut items = self.items.write().await;
        let id = items.iter().map(|i| i.id).max().map_or(1, |max| max + 1);
        let item = Item::new(id, item.title, item.genres);
        items.push(item.clone());
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryStore {
        InMemoryStore::new(
            vec![
                Item::new(1, "Toy Story (1995)", "Adventure|Animation|Children"),
                Item::new(2, "Jumanji (1995)", "Adventure|Children|Fantasy"),
                Item::new(10, "Toy Story 2 (1999)", "Adventure|Animation|Children"),
            ],
            vec![
                Rating::new(1, 1, 4.0, 100),
                Rating::new(2, 2, 3.5, 200),
                Rating::new(1, 10, 5.0, 300),
            ],
        )
    }

    #[tokio::test]
    async fn test_ratings_for_user() {
        let store = store();
        let ratings = store.ratings_for_user(1).await.unwrap();
        let items: Vec<ItemId> = ratings.iter().map(|r| r.item_id).collect();
        assert_eq!(items, vec![1, 10]);
        assert!(store.ratings_for_user(99).await.unwrap().is_empty());
        assert_eq!(store.all_ratings().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_titles_ignores_case() {
        let store = store();
        let found = store.search_titles("toy story").await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(store.search_titles("matrix").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_tag() {
        let store = store();
        let fantasy = store.find_by_tag("Fantasy").await.unwrap();
        assert_eq!(fantasy.len(), 1);
        assert_eq!(fantasy[0].id, 2);
        assert_eq!(store.find_by_tag("Adventure").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_insert_assigns_next_id() {
        let store = store();
        let item = store
            .insert(NewItem {
                title: "Heat (1995)".to_string(),
                genres: "Action|Crime|Thriller".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(item.id, 11);
        assert_eq!(store.find_by_id(11).await.unwrap(), Some(item));
        assert_eq!(store.all_items().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_insert_into_empty_store() {
        let store = InMemoryStore::default();
        let item = store
            .insert(NewItem {
                title: "First".to_string(),
                genres: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(item.id, 1);
    }
}
