use anyhow::{Context, Result};

use super::connection::DbConn;

/// Create any missing tables; existing data is kept
pub fn initialize(conn: &mut DbConn) -> Result<()> {
    run_script(conn, include_str!("schema.sql"))?;
    log::info!("Database schema ready");
    Ok(())
}

/// Drop every table and recreate the schema
pub fn reset_database(conn: &mut DbConn) -> Result<()> {
    run_script(conn, include_str!("drop.sql"))?;
    run_script(conn, include_str!("schema.sql"))?;
    log::info!("Database schema reset successfully");
    Ok(())
}

fn run_script(conn: &mut DbConn, sql: &str) -> Result<()> {
    let statements = split_sql_statements(sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}
