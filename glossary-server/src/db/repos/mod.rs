//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool from the [`Database`](super::Database) handle
//! - Lets UNIQUE constraints detect duplicates (no check-then-insert)
//! - Uses transactions for multi-step operations

pub mod sections;
pub mod terms;

pub use sections::{Section, SectionRepo, SectionWithTerms};
pub use terms::{Term, TermRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("section '{0}' already exists")]
    DuplicateSectionName(String),

    #[error("term '{0}' already exists")]
    DuplicateTerm(String),

    #[error("section {0} does not exist")]
    UnknownSection(i64),
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// True when `err` comes from a UNIQUE constraint.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// True when `err` comes from a FOREIGN KEY constraint.
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
