use serde::{Deserialize, Serialize};

use super::ItemId;

/// Separator between tags in an item's genre string (e.g. "Action|Sci-Fi")
pub const TAG_DELIMITER: char = '|';

/// Placeholder the MovieLens data set uses for items without any genre
const NO_TAGS_MARKER: &str = "(no genres listed)";

/// A catalog item with its raw, pipe-delimited genre string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique identifier for the item
    pub id: ItemId,
    /// Display title (e.g., "Toy Story (1995)")
    pub title: String,
    /// Pipe-delimited genre tags as stored upstream
    pub genres: String,
}

/// Payload for adding an item to the catalog; the store assigns the id
#[derive(Debug, Clone, Deserialize)]
pub struct NewItem {
    pub title: String,
    #[serde(default)]
    pub genres: String,
}

impl Item {
    /// Creates a new item
    pub fn new(id: ItemId, title: impl Into<String>, genres: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: genres.into(),
        }
    }

    /// Iterates over the item's tags.
    ///
    /// Blank segments and the "no genres" placeholder are dropped, so a
    /// malformed or empty genre string simply yields no tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.genres
            .split(TAG_DELIMITER)
            .map(str::trim)
            .filter(|tag| !tag.is_empty() && *tag != NO_TAGS_MARKER)
    }

    /// Checks whether the item carries the given tag (case-sensitive)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_split_on_pipe() {
        let item = Item::new(1, "Toy Story (1995)", "Adventure|Animation|Children");
        let tags: Vec<&str> = item.tags().collect();
        assert_eq!(tags, vec!["Adventure", "Animation", "Children"]);
    }

    #[test]
    fn test_empty_and_blank_segments_are_skipped() {
        let item = Item::new(1, "Odd", "|Drama||  |");
        let tags: Vec<&str> = item.tags().collect();
        assert_eq!(tags, vec!["Drama"]);

        let empty = Item::new(2, "Nothing", "");
        assert_eq!(empty.tags().count(), 0);
    }

    #[test]
    fn test_no_genres_placeholder_yields_no_tags() {
        let item = Item::new(1, "Unknown", "(no genres listed)");
        assert_eq!(item.tags().count(), 0);
    }

    #[test]
    fn test_has_tag() {
        let item = Item::new(1, "Heat (1995)", "Action|Crime|Thriller");
        assert!(item.has_tag("Crime"));
        assert!(!item.has_tag("crime"));
        assert!(!item.has_tag("Comedy"));
    }
}
