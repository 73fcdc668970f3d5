//! API error type with IntoResponse
//!
//! Errors become short plain-text bodies with the matching status code.
//! Storage and rendering failures are logged and answered generically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::DbError;
use crate::models::ValidationError;
use crate::render::RenderError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Form input failed validation (400)
    Validation(ValidationError),

    /// Section name or term text already taken (400)
    Duplicate { resource: &'static str },

    /// Term submitted for a section that does not exist (400)
    UnknownSection(i64),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Template error (500, logged)
    Render(RenderError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Duplicate { .. } | Self::UnknownSection(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(e) => e.to_string(),
            Self::Duplicate { resource } => format!("{} already exists", resource),
            Self::UnknownSection(_) => "section does not exist".to_owned(),
            Self::NotFound { resource, id } => format!("{} '{}' not found", resource, id),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                "an internal error occurred".to_owned()
            }
            Self::Render(e) => {
                tracing::error!("Render error: {}", e);
                "an internal error occurred".to_owned()
            }
        };

        (status, message).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<RenderError> for ApiError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::DuplicateSectionName(_) => Self::Duplicate { resource: "section" },
            DbError::DuplicateTerm(_) => Self::Duplicate { resource: "term" },
            DbError::UnknownSection(id) => Self::UnknownSection(id),
            _ => Self::Database(e),
        }
    }
}
