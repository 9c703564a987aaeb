use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Item, ItemId, NewItem, UserId, UserRatingResponse},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Number of item ids to return; zero or negative yields an empty list
    pub top: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Collaborative-filtering recommendations for a user
pub async fn recommend_cosine(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<ItemId>>> {
    let top = query.top.unwrap_or(state.default_top_n);
    let items = state.recommendations.recommend(user_id, top).await?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        top,
        returned = items.len(),
        "Collaborative recommendations served"
    );

    Ok(Json(items))
}

/// Hybrid recommendations for a user
pub async fn recommend_hybrid(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<UserId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<ItemId>>> {
    let top = query.top.unwrap_or(state.default_top_n);
    let items = state.recommendations.recommend_hybrid(user_id, top).await?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        top,
        returned = items.len(),
        "Hybrid recommendations served"
    );

    Ok(Json(items))
}

/// Get all movies
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.items.all_items().await?))
}

/// Get one movie
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<ItemId>,
) -> AppResult<Json<Item>> {
    state
        .items
        .find_by_id(movie_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Movie {} does not exist", movie_id)))
}

/// Search movies by title keyword
pub async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.items.search_titles(&params.keyword).await?))
}

/// Movies carrying a genre tag
pub async fn movies_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> AppResult<Json<Vec<Item>>> {
    Ok(Json(state.items.find_by_tag(&genre).await?))
}

/// Add a movie and rebuild the genre feature table
pub async fn create_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<NewItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    if request.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title must not be empty".to_string()));
    }

    let item = state.items.insert(request).await?;
    state
        .recommendations
        .rebuild_features(state.items.as_ref())
        .await?;

    tracing::info!(
        request_id = %request_id,
        movie_id = item.id,
        "Movie added, feature table rebuilt"
    );

    Ok((StatusCode::CREATED, Json(item)))
}

/// Ratings made by a user
pub async fn user_ratings(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<UserRatingResponse>>> {
    let ratings = state.ratings.ratings_for_user(user_id).await?;
    if ratings.is_empty() {
        return Err(AppError::NotFound(format!("User {} has no ratings", user_id)));
    }
    Ok(Json(ratings.iter().map(UserRatingResponse::from).collect()))
}
