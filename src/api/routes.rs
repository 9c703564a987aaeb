use axum::{
    middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Recommendations
        .route("/recommendations/cosine/:user_id", get(handlers::recommend_cosine))
        .route("/recommendations/hybrid/:user_id", get(handlers::recommend_hybrid))
        // Catalog
        .route("/movies", get(handlers::list_movies).post(handlers::create_movie))
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/genre/:genre", get(handlers::movies_by_genre))
        .route("/movies/:movie_id", get(handlers::get_movie))
        // Ratings
        .route("/users/:user_id/ratings", get(handlers::user_ratings))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
