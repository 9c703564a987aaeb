//! Bootstrap loading of MovieLens-style CSV exports.
//!
//! Rows that fail to deserialize are logged and skipped; only I/O failures
//! abort a load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{Item, ItemId, Rating, UserId},
};

/// `movieId,title,genres`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MovieRow {
    movie_id: ItemId,
    title: String,
    #[serde(default)]
    genres: String,
}

/// `userId,movieId,rating,timestamp`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RatingRow {
    user_id: UserId,
    movie_id: ItemId,
    rating: f64,
    #[serde(default)]
    timestamp: i64,
}

impl From<MovieRow> for Item {
    fn from(row: MovieRow) -> Self {
        Item::new(row.movie_id, row.title, row.genres)
    }
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Rating::new(row.user_id, row.movie_id, row.rating, row.timestamp)
    }
}

/// Parses catalog items from CSV with a header row
pub fn load_items<R: Read>(reader: R) -> AppResult<Vec<Item>> {
    let items = read_rows::<MovieRow, _>(reader, "movies")?
        .into_iter()
        .map(Item::from)
        .collect();
    Ok(items)
}

/// Parses ratings from CSV with a header row, keeping file order
pub fn load_ratings<R: Read>(reader: R) -> AppResult<Vec<Rating>> {
    let ratings = read_rows::<RatingRow, _>(reader, "ratings")?
        .into_iter()
        .map(Rating::from)
        .collect();
    Ok(ratings)
}

pub fn load_items_from_path(path: impl AsRef<Path>) -> AppResult<Vec<Item>> {
    let path = path.as_ref();
    let items = load_items(File::open(path)?)?;
    tracing::info!(path = %path.display(), count = items.len(), "Loaded catalog");
    Ok(items)
}

pub fn load_ratings_from_path(path: impl AsRef<Path>) -> AppResult<Vec<Rating>> {
    let path = path.as_ref();
    let ratings = load_ratings(File::open(path)?)?;
    tracing::info!(path = %path.display(), count = ratings.len(), "Loaded ratings");
    Ok(ratings)
}

fn read_rows<T, R>(reader: R, source: &'static str) -> AppResult<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in csv_reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                skipped += 1;
                tracing::warn!(source, error = %e, "Skipping malformed row");
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(source, skipped, loaded = rows.len(), "Some rows were skipped");
    }

    Ok(rows)
}
