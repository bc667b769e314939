use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{Movie, MovieId, NewMovie};

const MOVIE_COLUMNS: &str = "id, title, release_year, created_at";

pub fn insert_movie(conn: &mut DbConn, movie: &NewMovie, created_at: DateTime<Utc>) -> Result<Movie> {
    let sql = format!(
        "INSERT INTO movies (title, release_year, created_at) VALUES (?1, ?2, ?3) RETURNING {}",
        MOVIE_COLUMNS
    );

    conn.query_row(
        &sql,
        params![movie.title, movie.release_year, created_at],
        parse_movie_row,
    )
    .context("Failed to insert movie")
}

pub fn get_movie(conn: &mut DbConn, movie_id: MovieId) -> Result<Option<Movie>> {
    let sql = format!("SELECT {} FROM movies WHERE id = ?1", MOVIE_COLUMNS);

    conn.query_row(&sql, params![movie_id], parse_movie_row)
        .optional()
        .context("Failed to get movie")
}

fn parse_movie_row(row: &rusqlite::Row) -> rusqlite::Result<Movie> {
    Ok(Movie {
        id: row.get(0)?,
        title: row.get(1)?,
        release_year: row.get(2)?,
        created_at: row.get(3)?,
    })
}
