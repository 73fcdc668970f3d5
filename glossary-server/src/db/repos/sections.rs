//! Section repository
//!
//! Handles section CRUD with proper patterns:
//! - create: plain INSERT, UNIQUE(name) reports duplicates
//! - list_with_terms: two queries, grouped in memory (no N+1)
//! - delete: one transaction removing the terms, then the section

use std::collections::HashMap;

use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use super::terms::Term;
use super::{is_unique_violation, DbError};
use crate::models::SectionName;

/// Section record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Section {
    pub id: i64,
    pub name: String,
}

/// Section together with the terms it owns, for the index page
#[derive(Debug, Clone, Serialize)]
pub struct SectionWithTerms {
    pub id: i64,
    pub name: String,
    pub terms: Vec<Term>,
}

/// Section repository
pub struct SectionRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SectionRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a section.
    ///
    /// Fails with [`DbError::DuplicateSectionName`] when the name is taken;
    /// nothing is written in that case.
    pub async fn create(&self, name: SectionName) -> Result<Section, DbError> {
        let section: Section = sqlx::query_as(
            r#"
            INSERT INTO section (name) VALUES (?)
            RETURNING id, name
            "#,
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::DuplicateSectionName(name.as_str().to_owned())
            } else {
                e.into()
            }
        })?;

        tracing::info!(section_id = section.id, name = %section.name, "section created");
        Ok(section)
    }

    /// Get a single section by id.
    pub async fn get(&self, id: i64) -> Result<Section, DbError> {
        sqlx::query_as("SELECT id, name FROM section WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("section", id))
    }

    /// Look a section up by its exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Section>, DbError> {
        let section = sqlx::query_as("SELECT id, name FROM section WHERE name = ?")
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        Ok(section)
    }

    /// All sections, ascending by name.
    pub async fn list(&self) -> Result<Vec<Section>, DbError> {
        let sections = sqlx::query_as("SELECT id, name FROM section ORDER BY name")
            .fetch_all(self.pool)
            .await?;

        Ok(sections)
    }

    /// All sections ascending by name, each with its terms ascending by
    /// term text.
    pub async fn list_with_terms(&self) -> Result<Vec<SectionWithTerms>, DbError> {
        let sections = self.list().await?;

        let terms: Vec<Term> = sqlx::query_as(
            r#"
            SELECT id, term, definition, comment, updated_at, section_id
            FROM term
            ORDER BY term
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let mut by_section: HashMap<i64, Vec<Term>> = HashMap::new();
        for term in terms {
            by_section.entry(term.section_id).or_default().push(term);
        }

        Ok(sections
            .into_iter()
            .map(|s| SectionWithTerms {
                terms: by_section.remove(&s.id).unwrap_or_default(),
                id: s.id,
                name: s.name,
            })
            .collect())
    }

    /// Delete a section and every term it owns, atomically.
    ///
    /// Returns the number of terms removed with it.
    pub async fn delete(&self, id: i64) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let removed_terms = sqlx::query("DELETE FROM term WHERE section_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed = sqlx::query("DELETE FROM section WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            // dropping tx rolls back
            return Err(DbError::not_found("section", id));
        }

        tx.commit().await?;

        tracing::info!(section_id = id, removed_terms, "section deleted");
        Ok(removed_terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("glossary.db")).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn create_then_find_by_name() {
        let (_dir, db) = test_db().await;
        let repo = SectionRepo::new(db.pool());

        let created = repo
            .create(SectionName::new("Metrics").unwrap())
            .await
            .unwrap();
        let found = repo.find_by_name("Metrics").await.unwrap();

        assert_eq!(found, Some(created));
        assert_eq!(repo.find_by_name("metrics").await.unwrap(), None);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let (_dir, db) = test_db().await;
        let err = SectionRepo::new(db.pool()).get(99).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "section", .. }));
    }

    #[tokio::test]
    async fn empty_section_is_listed_with_no_terms() {
        let (_dir, db) = test_db().await;
        let repo = SectionRepo::new(db.pool());
        repo.create(SectionName::new("Empty").unwrap()).await.unwrap();

        let listed = repo.list_with_terms().await.unwrap();

        assert_eq!(listed.len(), 1);
        assert!(listed[0].terms.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (_dir, db) = test_db().await;
        let err = SectionRepo::new(db.pool()).delete(1).await.unwrap_err();

        assert!(matches!(err, DbError::NotFound { resource: "section", .. }));
    }
}
