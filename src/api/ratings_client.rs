use anyhow::{Context, Result};
use log::info;

use super::source::RatingSource;
use crate::domain::{
    AggregateRating, MovieId, Rating, RatingSubmission, RatingWithDemographics, UserId,
};
use crate::errors::GatewayError;
use crate::http::ApiClient;
use crate::statistics::{MovieStatistics, PopulationBreakdown};

/// Ratings API client
pub struct RemoteRatingStore {
    client: ApiClient,
}

impl RemoteRatingStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Statistics computed by the server
    pub async fn server_statistics(&self, movie_id: MovieId) -> Result<MovieStatistics, GatewayError> {
        info!("Fetching server statistics for movie {}", movie_id);
        self.client.get_json(&Self::statistics_path(movie_id)).await
    }

    pub async fn server_population(
        &self,
        movie_id: MovieId,
    ) -> Result<PopulationBreakdown, GatewayError> {
        let path = format!("{}/population", Self::statistics_path(movie_id));
        self.client.get_json(&path).await
    }

    pub async fn submit_rating(
        &self,
        movie_id: MovieId,
        submission: &RatingSubmission,
    ) -> Result<Rating, GatewayError> {
        self.client
            .put_json(&Self::ratings_path(movie_id), submission)
            .await
    }

    pub async fn remove_rating(&self, movie_id: MovieId, user_id: UserId) -> Result<(), GatewayError> {
        let path = format!("{}/user/{}", Self::ratings_path(movie_id), user_id);
        self.client.delete(&path).await
    }

    // --- Helper Methods ---

    fn ratings_path(movie_id: MovieId) -> String {
        format!("/ratings/movie/{}", movie_id)
    }

    fn aggregate_path(movie_id: MovieId) -> String {
        format!("/ratings/movie/{}/stats", movie_id)
    }

    fn statistics_path(movie_id: MovieId) -> String {
        format!("/statistics/movie/{}", movie_id)
    }
}

impl RatingSource for RemoteRatingStore {
    async fn list_ratings_for_movie(&self, movie_id: MovieId) -> Result<Vec<RatingWithDemographics>> {
        let ratings: Vec<RatingWithDemographics> = self
            .client
            .get_json(&Self::ratings_path(movie_id))
            .await
            .with_context(|| format!("Failed to fetch ratings for movie {}", movie_id))?;

        info!("Fetched {} ratings for movie {}", ratings.len(), movie_id);
        Ok(ratings)
    }

    async fn get_aggregate(&self, movie_id: MovieId) -> Result<AggregateRating> {
        self.client
            .get_json(&Self::aggregate_path(movie_id))
            .await
            .with_context(|| format!("Failed to fetch aggregate rating for movie {}", movie_id))
    }
}
