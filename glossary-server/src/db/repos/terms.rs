//! Term repository
//!
//! Handles term CRUD with:
//! - Every write a single statement, so SQLite's busy timeout covers it
//! - `updated_at` stamped on every write
//! - UNIQUE(term) surfaced as [`DbError::DuplicateTerm`]
//! - The section foreign key surfaced as [`DbError::UnknownSection`]

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::{is_foreign_key_violation, is_unique_violation, DbError};
use crate::models::TermInput;

/// Term record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Term {
    pub id: i64,
    pub term: String,
    pub definition: String,
    pub comment: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub section_id: i64,
}

/// Term repository
pub struct TermRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TermRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a term inside an existing section.
    ///
    /// Fails with [`DbError::UnknownSection`] if the section is absent and
    /// [`DbError::DuplicateTerm`] if the text is already used.
    pub async fn create(&self, input: &TermInput) -> Result<Term, DbError> {
        let term: Term = sqlx::query_as(
            r#"
            INSERT INTO term (term, definition, comment, updated_at, section_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, term, definition, comment, updated_at, section_id
            "#,
        )
        .bind(input.term.as_str())
        .bind(input.definition.as_str())
        .bind(input.comment.as_deref())
        .bind(Utc::now())
        .bind(input.section_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| write_error(e, input))?;

        tracing::info!(term_id = term.id, section_id = term.section_id, "term created");
        Ok(term)
    }

    /// Get a single term by id.
    pub async fn get(&self, id: i64) -> Result<Term, DbError> {
        sqlx::query_as(
            r#"
            SELECT id, term, definition, comment, updated_at, section_id
            FROM term
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("term", id))
    }

    /// Look a term up by its exact text.
    pub async fn find_by_name(&self, term: &str) -> Result<Option<Term>, DbError> {
        let found = sqlx::query_as(
            r#"
            SELECT id, term, definition, comment, updated_at, section_id
            FROM term
            WHERE term = ?
            "#,
        )
        .bind(term)
        .fetch_optional(self.pool)
        .await?;

        Ok(found)
    }

    /// Overwrite every field of a term and bump `updated_at`.
    ///
    /// A missing term is [`DbError::NotFound`] whatever the input; the row
    /// filter runs before any constraint is checked.
    pub async fn update(&self, id: i64, input: &TermInput) -> Result<Term, DbError> {
        let term: Term = sqlx::query_as(
            r#"
            UPDATE term
            SET term = ?, definition = ?, comment = ?, updated_at = ?, section_id = ?
            WHERE id = ?
            RETURNING id, term, definition, comment, updated_at, section_id
            "#,
        )
        .bind(input.term.as_str())
        .bind(input.definition.as_str())
        .bind(input.comment.as_deref())
        .bind(Utc::now())
        .bind(input.section_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| write_error(e, input))?
        .ok_or_else(|| DbError::not_found("term", id))?;

        tracing::info!(term_id = id, section_id = term.section_id, "term updated");
        Ok(term)
    }

    /// Delete a single term.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let removed = sqlx::query("DELETE FROM term WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(DbError::not_found("term", id));
        }

        tracing::info!(term_id = id, "term deleted");
        Ok(())
    }
}

fn write_error(err: sqlx::Error, input: &TermInput) -> DbError {
    if is_unique_violation(&err) {
        DbError::DuplicateTerm(input.term.as_str().to_owned())
    } else if is_foreign_key_violation(&err) {
        DbError::UnknownSection(input.section_id)
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, SectionRepo};
    use crate::models::SectionName;

    async fn db_with_section() -> (tempfile::TempDir, Database, i64) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("glossary.db")).await.unwrap();
        let section = SectionRepo::new(db.pool())
            .create(SectionName::new("Optimization").unwrap())
            .await
            .unwrap();
        (dir, db, section.id)
    }

    #[tokio::test]
    async fn create_in_unknown_section_fails() {
        let (_dir, db, section_id) = db_with_section().await;
        let input = TermInput::new("Momentum", "Velocity term", None, section_id + 1).unwrap();

        let err = TermRepo::new(db.pool()).create(&input).await.unwrap_err();

        assert!(matches!(err, DbError::UnknownSection(id) if id == section_id + 1));
        assert!(TermRepo::new(db.pool()).find_by_name("Momentum").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (_dir, db, section_id) = db_with_section().await;
        let input = TermInput::new("Momentum", "Velocity term", None, section_id).unwrap();

        let err = TermRepo::new(db.pool()).update(404, &input).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "term", .. }));
    }

    #[tokio::test]
    async fn update_to_unknown_section_fails() {
        let (_dir, db, section_id) = db_with_section().await;
        let repo = TermRepo::new(db.pool());
        let created = repo
            .create(&TermInput::new("Momentum", "Velocity term", None, section_id).unwrap())
            .await
            .unwrap();

        let moved = TermInput::new("Momentum", "Velocity term", None, section_id + 1).unwrap();
        let err = repo.update(created.id, &moved).await.unwrap_err();

        assert!(matches!(err, DbError::UnknownSection(id) if id == section_id + 1));
        assert_eq!(repo.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_missing_with_unknown_section_is_not_found() {
        let (_dir, db, section_id) = db_with_section().await;
        let input = TermInput::new("Momentum", "Velocity term", None, section_id + 1).unwrap();

        let err = TermRepo::new(db.pool()).update(404, &input).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "term", .. }));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_all_succeed() {
        let (_dir, db, section_id) = db_with_section().await;

        let handles: Vec<_> = (0..64)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    let input =
                        TermInput::new(&format!("term-{i}"), "written concurrently", None, section_id)
                            .unwrap();
                    TermRepo::new(db.pool()).create(&input).await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM term")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(count, 64);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_all_succeed() {
        let (_dir, db, section_id) = db_with_section().await;
        let mut ids = Vec::new();
        for i in 0..32 {
            let input = TermInput::new(&format!("term-{i}"), "first", None, section_id).unwrap();
            ids.push(TermRepo::new(db.pool()).create(&input).await.unwrap().id);
        }

        let handles: Vec<_> = ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                let db = db.clone();
                tokio::spawn(async move {
                    let input =
                        TermInput::new(&format!("term-{i}"), "second", None, section_id).unwrap();
                    TermRepo::new(db.pool()).update(id, &input).await
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap().definition, "second");
        }
    }

    #[tokio::test]
    async fn update_to_taken_text_is_duplicate() {
        let (_dir, db, section_id) = db_with_section().await;
        let repo = TermRepo::new(db.pool());
        repo.create(&TermInput::new("Adam", "Adaptive moments", None, section_id).unwrap())
            .await
            .unwrap();
        let sgd = repo
            .create(&TermInput::new("SGD", "Stochastic gradient descent", None, section_id).unwrap())
            .await
            .unwrap();

        let rename = TermInput::new("Adam", "Stochastic gradient descent", None, section_id).unwrap();
        let err = repo.update(sgd.id, &rename).await.unwrap_err();

        assert!(matches!(err, DbError::DuplicateTerm(ref t) if t == "Adam"));
        assert_eq!(repo.get(sgd.id).await.unwrap(), sgd);
    }

    #[tokio::test]
    async fn update_keeping_own_text_succeeds() {
        let (_dir, db, section_id) = db_with_section().await;
        let repo = TermRepo::new(db.pool());
        let created = repo
            .create(&TermInput::new("Adam", "Adaptive moments", None, section_id).unwrap())
            .await
            .unwrap();

        let edit = TermInput::new("Adam", "Adaptive moment estimation", Some("Kingma & Ba"), section_id)
            .unwrap();
        let updated = repo.update(created.id, &edit).await.unwrap();

        assert_eq!(updated.definition, "Adaptive moment estimation");
        assert_eq!(updated.comment.as_deref(), Some("Kingma & Ba"));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let (_dir, db, section_id) = db_with_section().await;
        let repo = TermRepo::new(db.pool());
        let term = repo
            .create(&TermInput::new("Epoch", "One pass", None, section_id).unwrap())
            .await
            .unwrap();

        repo.delete(term.id).await.unwrap();
        let err = repo.delete(term.id).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "term", .. }));
    }
}
