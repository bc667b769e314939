use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type MovieId = i64;
pub type UserId = i64;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 10;

/// One user's score for one movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: i64,
    pub movie_id: MovieId,
    pub user_id: UserId,
    pub score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rater attributes as recorded on the user at query time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
}

impl Demographics {
    pub fn country(&self) -> Option<&str> {
        non_empty(self.country.as_deref())
    }

    pub fn continent(&self) -> Option<&str> {
        non_empty(self.continent.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// A rating joined with its author's demographics.
/// Serialized as a single flat object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingWithDemographics {
    #[serde(flatten)]
    pub rating: Rating,
    #[serde(flatten)]
    pub demographics: Demographics,
}

impl RatingWithDemographics {
    pub fn score(&self) -> i32 {
        self.rating.score
    }
}

/// Overall average and count for a movie
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateRating {
    pub average: f64,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub release_year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(flatten)]
    pub demographics: Demographics,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub release_year: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    #[serde(flatten)]
    pub demographics: Demographics,
}

/// Body of a rating submission; resubmitting replaces the previous score
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSubmission {
    pub user_id: UserId,
    pub score: i32,
}

impl RatingSubmission {
    pub fn has_valid_score(&self) -> bool {
        (MIN_SCORE..=MAX_SCORE).contains(&self.score)
    }
}

/// The signed-in user held by a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
}
