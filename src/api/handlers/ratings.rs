use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use std::sync::Arc;

use super::{ApiError, ApiResult, AppState, connection, require_movie};
use crate::database::{ratings, users};
use crate::domain::{
    AggregateRating, MAX_SCORE, MIN_SCORE, MovieId, Rating, RatingSubmission,
    RatingWithDemographics, UserId,
};

pub async fn list_movie_ratings(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<MovieId>,
) -> ApiResult<Json<Vec<RatingWithDemographics>>> {
    let mut conn = connection(&state.pool)?;
    require_movie(&mut conn, movie_id)?;

    let rows = ratings::list_for_movie_with_demographics(&mut conn, movie_id)?;
    Ok(Json(rows))
}

pub async fn get_movie_aggregate(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<MovieId>,
) -> ApiResult<Json<AggregateRating>> {
    let mut conn = connection(&state.pool)?;
    require_movie(&mut conn, movie_id)?;

    Ok(Json(ratings::aggregate_for_movie(&mut conn, movie_id)?))
}

/// Create the user's rating, or replace the score of an existing one
pub async fn submit_rating(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<MovieId>,
    Json(submission): Json<RatingSubmission>,
) -> ApiResult<Json<Rating>> {
    if !submission.has_valid_score() {
        return Err(ApiError::BadRequest(format!(
            "Score must be between {} and {}, got {}",
            MIN_SCORE, MAX_SCORE, submission.score
        )));
    }

    let mut conn = connection(&state.pool)?;
    require_movie(&mut conn, movie_id)?;

    if users::get_user(&mut conn, submission.user_id)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "User {} not found",
            submission.user_id
        )));
    }

    let rating = ratings::upsert_rating(
        &mut conn,
        movie_id,
        submission.user_id,
        submission.score,
        Utc::now(),
    )?;

    log::info!(
        "User {} rated movie {} with {}",
        rating.user_id,
        rating.movie_id,
        rating.score
    );
    Ok(Json(rating))
}

pub async fn delete_rating(
    State(state): State<Arc<AppState>>,
    Path((movie_id, user_id)): Path<(MovieId, UserId)>,
) -> ApiResult<StatusCode> {
    let mut conn = connection(&state.pool)?;

    if !ratings::delete_rating(&mut conn, movie_id, user_id)? {
        return Err(ApiError::NotFound(format!(
            "User {} has not rated movie {}",
            user_id, movie_id
        )));
    }

    log::info!("Removed rating of movie {} by user {}", movie_id, user_id);
    Ok(StatusCode::NO_CONTENT)
}
