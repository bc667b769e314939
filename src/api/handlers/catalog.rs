use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use std::sync::Arc;

use super::{ApiError, ApiResult, AppState, connection, require_movie};
use crate::database::{movies, users};
use crate::domain::{Movie, MovieId, NewMovie, NewUser, User};

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(movie): Json<NewMovie>,
) -> ApiResult<(StatusCode, Json<Movie>)> {
    if movie.title.trim().is_empty() {
        return Err(ApiError::BadRequest("Movie title must not be empty".to_string()));
    }

    let mut conn = connection(&state.pool)?;
    let created = movies::insert_movie(&mut conn, &movie, Utc::now())?;

    log::info!("Created movie {} ({})", created.id, created.title);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<MovieId>,
) -> ApiResult<Json<Movie>> {
    let mut conn = connection(&state.pool)?;
    Ok(Json(require_movie(&mut conn, movie_id)?))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<NewUser>,
) -> ApiResult<(StatusCode, Json<User>)> {
    if user.username.trim().is_empty() {
        return Err(ApiError::BadRequest("Username must not be empty".to_string()));
    }

    let mut conn = connection(&state.pool)?;
    if users::username_taken(&mut conn, &user.username)? {
        return Err(ApiError::Conflict(format!(
            "Username {} is already taken",
            user.username
        )));
    }

    let created = users::insert_user(&mut conn, &user, Utc::now())?;
    log::info!("Created user {} ({})", created.id, created.username);
    Ok((StatusCode::CREATED, Json(created)))
}
