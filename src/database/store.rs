use anyhow::Result;

use super::connection::{DbPool, get_connection};
use super::ratings;
use crate::api::RatingSource;
use crate::domain::{AggregateRating, MovieId, RatingWithDemographics};

/// Rating source backed by the local SQLite database
#[derive(Clone)]
pub struct LocalRatingStore {
    pool: DbPool,
}

impl LocalRatingStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl RatingSource for LocalRatingStore {
    async fn list_ratings_for_movie(&self, movie_id: MovieId) -> Result<Vec<RatingWithDemographics>> {
        let mut conn = get_connection(&self.pool)?;
        ratings::list_for_movie_with_demographics(&mut conn, movie_id)
    }

    async fn get_aggregate(&self, movie_id: MovieId) -> Result<AggregateRating> {
        let mut conn = get_connection(&self.pool)?;
        ratings::aggregate_for_movie(&mut conn, movie_id)
    }
}
