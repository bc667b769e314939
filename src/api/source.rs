use anyhow::Result;
use std::future::Future;

use crate::domain::{AggregateRating, MovieId, RatingWithDemographics};

/// Read access to a movie's ratings. Failures are returned to the caller;
/// implementations do not retry.
pub trait RatingSource {
    fn list_ratings_for_movie(
        &self,
        movie_id: MovieId,
    ) -> impl Future<Output = Result<Vec<RatingWithDemographics>>> + Send;

    fn get_aggregate(&self, movie_id: MovieId)
    -> impl Future<Output = Result<AggregateRating>> + Send;
}
