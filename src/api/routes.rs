use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::api::handlers::{
    AppState,
    catalog::{create_movie, create_user, get_movie},
    ratings::{delete_rating, get_movie_aggregate, list_movie_ratings, submit_rating},
    statistics::{get_movie_population, get_movie_statistics},
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(catalog_routes())
        .merge(rating_routes())
        .merge(statistics_routes())
        .with_state(state)
}

pub fn catalog_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/movies", post(create_movie))
        .route("/movies/:movie_id", get(get_movie))
        .route("/users", post(create_user))
}

pub fn rating_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/ratings/movie/:movie_id",
            get(list_movie_ratings).put(submit_rating),
        )
        .route("/ratings/movie/:movie_id/stats", get(get_movie_aggregate))
        .route(
            "/ratings/movie/:movie_id/user/:user_id",
            delete(delete_rating),
        )
}

pub fn statistics_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/statistics/movie/:movie_id", get(get_movie_statistics))
        .route(
            "/statistics/movie/:movie_id/population",
            get(get_movie_population),
        )
}
