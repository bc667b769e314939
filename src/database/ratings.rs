use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{
    AggregateRating, Demographics, MovieId, Rating, RatingWithDemographics, UserId,
};

const RATING_COLUMNS: &str = "id, movie_id, user_id, score, created_at, updated_at";

/// Insert the user's rating for a movie, or replace the score of the one
/// already there. `id` and `created_at` survive a resubmission.
pub fn upsert_rating(
    conn: &mut DbConn,
    movie_id: MovieId,
    user_id: UserId,
    score: i32,
    now: DateTime<Utc>,
) -> Result<Rating> {
    let sql = format!(
        "INSERT INTO ratings (movie_id, user_id, score, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4) \
         ON CONFLICT (movie_id, user_id) DO UPDATE SET score = excluded.score, updated_at = excluded.updated_at \
         RETURNING {}",
        RATING_COLUMNS
    );

    conn.query_row(&sql, params![movie_id, user_id, score, now], parse_rating_row)
        .with_context(|| format!("Failed to save rating of movie {} by user {}", movie_id, user_id))
}

pub fn get_rating(conn: &mut DbConn, movie_id: MovieId, user_id: UserId) -> Result<Option<Rating>> {
    let sql = format!(
        "SELECT {} FROM ratings WHERE movie_id = ?1 AND user_id = ?2",
        RATING_COLUMNS
    );

    conn.query_row(&sql, params![movie_id, user_id], parse_rating_row)
        .optional()
        .context("Failed to get rating")
}

/// Returns whether a rating was removed
pub fn delete_rating(conn: &mut DbConn, movie_id: MovieId, user_id: UserId) -> Result<bool> {
    let deleted = conn
        .execute(
            "DELETE FROM ratings WHERE movie_id = ?1 AND user_id = ?2",
            params![movie_id, user_id],
        )
        .context("Failed to delete rating")?;

    Ok(deleted > 0)
}

pub fn list_for_movie_with_demographics(
    conn: &mut DbConn,
    movie_id: MovieId,
) -> Result<Vec<RatingWithDemographics>> {
    let sql = "SELECT r.id, r.movie_id, r.user_id, r.score, r.created_at, r.updated_at, \
               u.age, u.gender, u.country, u.continent \
               FROM ratings r JOIN users u ON u.id = r.user_id \
               WHERE r.movie_id = ?1 ORDER BY r.id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![movie_id], |row| {
            Ok(RatingWithDemographics {
                rating: parse_rating_row(row)?,
                demographics: Demographics {
                    age: row.get(6)?,
                    gender: row.get(7)?,
                    country: row.get(8)?,
                    continent: row.get(9)?,
                },
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list ratings for movie")?;

    Ok(rows)
}

pub fn aggregate_for_movie(conn: &mut DbConn, movie_id: MovieId) -> Result<AggregateRating> {
    conn.query_row(
        "SELECT COALESCE(AVG(score), 0.0), COUNT(*) FROM ratings WHERE movie_id = ?1",
        params![movie_id],
        |row| {
            Ok(AggregateRating {
                average: row.get(0)?,
                count: row.get(1)?,
            })
        },
    )
    .context("Failed to aggregate ratings for movie")
}

fn parse_rating_row(row: &rusqlite::Row) -> rusqlite::Result<Rating> {
    Ok(Rating {
        id: row.get(0)?,
        movie_id: row.get(1)?,
        user_id: row.get(2)?,
        score: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
