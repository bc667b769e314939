use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::database::{self, DbConn, DbPool, LocalRatingStore, movies};
use crate::domain::{Movie, MovieId};
use crate::services::statistics::StatisticsService;

pub mod catalog;
pub mod ratings;
pub mod statistics;

pub struct AppState {
    pub pool: DbPool,
    pub statistics: StatisticsService<LocalRatingStore>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        let statistics = StatisticsService::new(LocalRatingStore::new(pool.clone()));
        Self { pool, statistics }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Conflict(msg) => msg.clone(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            log::error!("Request failed: {:?}", err);
        }

        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

fn connection(pool: &DbPool) -> ApiResult<DbConn> {
    Ok(database::get_connection(pool)?)
}

fn require_movie(conn: &mut DbConn, movie_id: MovieId) -> ApiResult<Movie> {
    movies::get_movie(conn, movie_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Movie {} not found", movie_id)))
}
