//! Database handle and connection pool management
//!
//! Uses a sqlx `SqlitePool` over a single local file. The handle is created
//! explicitly by the caller and handed to the HTTP layer; nothing here is
//! process-global.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};

use super::migrations;
use super::repos::DbError;

/// Default maximum connections for the pool.
/// Kept low for single-user tooling.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits on SQLite's lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the glossary database file.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    /// Open the database at `path` and make sure the schema exists.
    ///
    /// This is what the server does on startup: the file (and its parent
    /// directory) is created when absent, then [`Database::migrate`] runs.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let db = Self::connect(path).await?;
        db.migrate().await?;
        Ok(db)
    }

    /// Connect without touching the schema.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, DbError> {
        Self::connect_with_options(path, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Connect with a custom pool size.
    ///
    /// # Arguments
    ///
    /// * `path` - SQLite database file, created if missing
    /// * `max_connections` - Maximum number of connections in the pool
    pub async fn connect_with_options(
        path: impl AsRef<Path>,
        max_connections: u32,
    ) -> Result<Self, DbError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(BUSY_TIMEOUT)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        tracing::info!(path = %path.display(), "opened glossary database");
        Ok(Self { pool, path })
    }

    /// Create the section and term tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), DbError> {
        migrations::run(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Close every pooled connection, flushing the WAL.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_file_and_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("glossary.db");

        let db = Database::open(&path).await.expect("open failed");

        assert!(path.exists());
        assert_eq!(db.path(), path.as_path());
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("glossary.db")).await.unwrap();

        let (enabled,): (i64,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn reopening_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glossary.db");

        let db = Database::open(&path).await.unwrap();
        sqlx::query("INSERT INTO section (name) VALUES ('Optimization')")
            .execute(db.pool())
            .await
            .unwrap();
        db.close().await;

        let db = Database::open(&path).await.unwrap();
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM section")
            .fetch_one(db.pool())
            .await
            .unwrap();

        assert_eq!(count, 1);
    }
}
