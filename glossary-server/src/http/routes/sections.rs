//! Section endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::SectionRepo;
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::models::SectionName;

/// Add section form body
#[derive(Deserialize)]
pub struct SectionForm {
    #[serde(default)]
    pub name: String,
}

/// GET /add_section - empty form
async fn add_section_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let html = state
        .renderer
        .render("add_section", &json!({ "title": "Add section" }))?;
    Ok(Html(html))
}

/// POST /add_section - create a section
async fn add_section(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SectionForm>,
) -> Result<Redirect, ApiError> {
    let name = SectionName::new(&form.name)?;
    SectionRepo::new(state.db.pool()).create(name).await?;

    Ok(Redirect::to("/"))
}

/// POST /delete_section/{id} - delete a section and all of its terms
async fn delete_section(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, ApiError> {
    SectionRepo::new(state.db.pool()).delete(id).await?;
    Ok(Redirect::to("/"))
}

/// Section routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add_section", get(add_section_form).post(add_section))
        .route("/delete_section/{id}", post(delete_section))
}
