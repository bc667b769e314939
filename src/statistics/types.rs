use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::buckets::{AgeBracket, Continent, GenderBucket};
use crate::domain::MovieId;

/// Average score per bucket. Empty fixed buckets hold 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieStatistics {
    pub movie_id: MovieId,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub age_buckets: BTreeMap<AgeBracket, f64>,
    pub gender_buckets: BTreeMap<GenderBucket, f64>,
    pub continent_buckets: BTreeMap<Continent, f64>,
    pub country_buckets: BTreeMap<String, f64>,
}

/// Each bucket's average as a percentage of the summed averages of its dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreShareBreakdown {
    pub movie_id: MovieId,
    pub age: BTreeMap<AgeBracket, f64>,
    pub gender: BTreeMap<GenderBucket, f64>,
    pub continent: BTreeMap<Continent, f64>,
    pub country: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketShare {
    pub count: usize,
    pub percentage: f64,
}

/// Rater counts per bucket, as a share of all ratings in the list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulationBreakdown {
    pub movie_id: MovieId,
    pub total_ratings: usize,
    pub age: BTreeMap<AgeBracket, BucketShare>,
    pub gender: BTreeMap<GenderBucket, BucketShare>,
    pub continent: BTreeMap<Continent, BucketShare>,
    pub country: BTreeMap<String, BucketShare>,
}
