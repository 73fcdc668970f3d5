//! Schema creation for the glossary tables
//!
//! There are no versioned migrations: both tables are created with
//! `IF NOT EXISTS` every time the database is opened.

use sqlx::SqlitePool;

use super::repos::DbError;

/// Create the `section` and `term` tables.
pub async fn run(pool: &SqlitePool) -> Result<(), DbError> {
    tracing::debug!("running glossary migrations");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS section (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(100) NOT NULL UNIQUE
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS term (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            term VARCHAR(100) NOT NULL UNIQUE,
            definition TEXT NOT NULL,
            comment TEXT,
            updated_at TEXT NOT NULL,
            section_id INTEGER NOT NULL REFERENCES section(id) ON DELETE CASCADE
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_term_section_id ON term(section_id);")
        .execute(pool)
        .await?;

    tracing::info!("database migrations complete");
    Ok(())
}
