use axum::extract::{Path, State};
use axum::response::Json;
use std::sync::Arc;

use super::{ApiResult, AppState, connection, require_movie};
use crate::domain::MovieId;
use crate::statistics::{MovieStatistics, PopulationBreakdown};

pub async fn get_movie_statistics(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<MovieId>,
) -> ApiResult<Json<MovieStatistics>> {
    ensure_movie_exists(&state, movie_id)?;

    let stats = state.statistics.movie_statistics(movie_id).await?;
    Ok(Json(stats))
}

pub async fn get_movie_population(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<MovieId>,
) -> ApiResult<Json<PopulationBreakdown>> {
    ensure_movie_exists(&state, movie_id)?;

    let population = state.statistics.movie_population(movie_id).await?;
    Ok(Json(population))
}

// The connection is released before the statistics service takes its own.
fn ensure_movie_exists(state: &AppState, movie_id: MovieId) -> ApiResult<()> {
    let mut conn = connection(&state.pool)?;
    require_movie(&mut conn, movie_id).map(|_| ())
}
