pub mod item;
pub mod rating;

pub use item::{Item, NewItem, TAG_DELIMITER};
pub use rating::{Rating, UserRatingResponse};

/// Identifier of a user in the rating data
pub type UserId = u64;

/// Identifier of a catalog item (a movie in the bundled data set)
pub type ItemId = u64;
