//! Custom Axum extractors

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;

/// Integer id taken from the path.
///
/// Anything that does not parse as an integer cannot name a stored row,
/// so it is rejected as not found rather than as a bad request.
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::NotFound {
                resource: "page",
                id: parts.uri.path().to_owned(),
            })?;

        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| ApiError::NotFound {
                resource: "record",
                id: raw,
            })
    }
}
