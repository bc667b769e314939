use anyhow::Result;
use log::{debug, warn};

use crate::api::{RatingSource, RemoteRatingStore};
use crate::domain::MovieId;
use crate::errors::GatewayError;
use crate::statistics::{
    MovieStatistics, PopulationBreakdown, compute_population, compute_statistics,
};

/// Aggregates statistics from whatever rating source it is given
pub struct StatisticsService<S> {
    source: S,
}

impl<S: RatingSource> StatisticsService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn movie_statistics(&self, movie_id: MovieId) -> Result<MovieStatistics> {
        let (ratings, aggregate) = tokio::try_join!(
            self.source.list_ratings_for_movie(movie_id),
            self.source.get_aggregate(movie_id),
        )?;

        debug!(
            "Aggregating {} ratings for movie {} (reported count {})",
            ratings.len(),
            movie_id,
            aggregate.count
        );
        Ok(compute_statistics(
            movie_id,
            &ratings,
            aggregate.average,
            aggregate.count,
        ))
    }

    pub async fn movie_population(&self, movie_id: MovieId) -> Result<PopulationBreakdown> {
        let ratings = self.source.list_ratings_for_movie(movie_id).await?;
        Ok(compute_population(movie_id, &ratings))
    }
}

/// Statistics from the remote API: the server-computed endpoint first,
/// client-side aggregation when that endpoint is unavailable.
pub struct RemoteStatistics {
    service: StatisticsService<RemoteRatingStore>,
}

impl RemoteStatistics {
    pub fn new(store: RemoteRatingStore) -> Self {
        Self {
            service: StatisticsService::new(store),
        }
    }

    pub async fn movie_statistics(&self, movie_id: MovieId) -> Result<MovieStatistics> {
        match self.store().server_statistics(movie_id).await {
            Ok(stats) => Ok(stats),
            Err(err) => {
                Self::fallback_allowed(err, movie_id)?;
                self.client_side(movie_id).await
            }
        }
    }

    /// Aggregate locally without asking the server for statistics
    pub async fn client_side(&self, movie_id: MovieId) -> Result<MovieStatistics> {
        self.service.movie_statistics(movie_id).await
    }

    pub async fn movie_population(&self, movie_id: MovieId) -> Result<PopulationBreakdown> {
        match self.store().server_population(movie_id).await {
            Ok(population) => Ok(population),
            Err(err) => {
                Self::fallback_allowed(err, movie_id)?;
                self.service.movie_population(movie_id).await
            }
        }
    }

    // --- Helper Methods ---

    fn store(&self) -> &RemoteRatingStore {
        self.service.source()
    }

    // A rejected token fails the same way on every endpoint, so it is not retried
    fn fallback_allowed(err: GatewayError, movie_id: MovieId) -> Result<()> {
        if err.is_unauthorized() {
            return Err(err.into());
        }

        warn!(
            "Server statistics unavailable for movie {} ({}), aggregating locally",
            movie_id, err
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AggregateRating, Demographics, Rating, RatingWithDemographics};
    use crate::statistics::GenderBucket;
    use anyhow::bail;
    use chrono::Utc;

    struct FakeSource {
        ratings: Vec<RatingWithDemographics>,
        aggregate: AggregateRating,
        fail: bool,
    }

    impl RatingSource for FakeSource {
        async fn list_ratings_for_movie(
            &self,
            _movie_id: MovieId,
        ) -> Result<Vec<RatingWithDemographics>> {
            if self.fail {
                bail!("connection refused");
            }
            Ok(self.ratings.clone())
        }

        async fn get_aggregate(&self, _movie_id: MovieId) -> Result<AggregateRating> {
            Ok(self.aggregate)
        }
    }

    fn female_rating(score: i32) -> RatingWithDemographics {
        let now = Utc::now();
        RatingWithDemographics {
            rating: Rating {
                id: 1,
                movie_id: 4,
                user_id: 2,
                score,
                created_at: now,
                updated_at: now,
            },
            demographics: Demographics {
                gender: Some("female".to_string()),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_statistics_use_reported_aggregate() {
        let service = StatisticsService::new(FakeSource {
            ratings: vec![female_rating(6), female_rating(8)],
            aggregate: AggregateRating {
                average: 6.5,
                count: 4,
            },
            fail: false,
        });

        let stats = service.movie_statistics(4).await.unwrap();

        assert_eq!(stats.total_ratings, 4);
        assert_eq!(stats.average_rating, 6.5);
        assert_eq!(stats.gender_buckets[&GenderBucket::Female], 7.0);
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let service = StatisticsService::new(FakeSource {
            ratings: Vec::new(),
            aggregate: AggregateRating::default(),
            fail: true,
        });

        let err = service.movie_statistics(4).await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));

        assert!(service.movie_population(4).await.is_err());
    }

    #[tokio::test]
    async fn test_population_counts_listed_ratings() {
        let service = StatisticsService::new(FakeSource {
            ratings: vec![female_rating(1), female_rating(2)],
            aggregate: AggregateRating::default(),
            fail: false,
        });

        let population = service.movie_population(4).await.unwrap();

        assert_eq!(population.total_ratings, 2);
        assert_eq!(population.gender[&GenderBucket::Female].percentage, 100.0);
    }
}
