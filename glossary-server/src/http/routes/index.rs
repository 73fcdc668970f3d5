//! Index page: every section with its terms

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};
use serde_json::json;

use crate::db::SectionRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET / - sections ascending by name, terms nested
async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let sections = SectionRepo::new(state.db.pool()).list_with_terms().await?;

    let html = state.renderer.render(
        "index",
        &json!({
            "title": "Glossary",
            "sections": sections,
        }),
    )?;
    Ok(Html(html))
}

/// Index routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}
