use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{Demographics, NewUser, User, UserId};

const USER_COLUMNS: &str = "id, username, age, gender, country, continent, created_at";

pub fn insert_user(conn: &mut DbConn, user: &NewUser, created_at: DateTime<Utc>) -> Result<User> {
    let sql = format!(
        "INSERT INTO users (username, age, gender, country, continent, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {}",
        USER_COLUMNS
    );
    let demographics = &user.demographics;

    conn.query_row(
        &sql,
        params![
            user.username,
            demographics.age,
            demographics.gender,
            demographics.country,
            demographics.continent,
            created_at
        ],
        parse_user_row,
    )
    .with_context(|| format!("Failed to insert user {}", user.username))
}

pub fn get_user(conn: &mut DbConn, user_id: UserId) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);

    conn.query_row(&sql, params![user_id], parse_user_row)
        .optional()
        .context("Failed to get user")
}

pub fn username_taken(conn: &mut DbConn, username: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM users WHERE username = ?1)",
        params![username],
        |row| row.get(0),
    )
    .context("Failed to look up username")
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        demographics: Demographics {
            age: row.get(2)?,
            gender: row.get(3)?,
            country: row.get(4)?,
            continent: row.get(5)?,
        },
        created_at: row.get(6)?,
    })
}
