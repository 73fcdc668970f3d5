//! Term endpoints: detail, add, edit, delete

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::{Section, SectionRepo, Term, TermRepo};
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::models::{parse_section_id, TermInput, ValidationError};

/// Add/edit term form body.
///
/// Every field defaults to empty so a missing field is reported by
/// validation with its name instead of a generic rejection.
#[derive(Deserialize)]
pub struct TermForm {
    #[serde(default)]
    pub term: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub section_id: String,
}

impl TermForm {
    fn into_input(self) -> Result<TermInput, ValidationError> {
        let section_id = parse_section_id(&self.section_id)?;
        TermInput::new(
            &self.term,
            &self.definition,
            self.comment.as_deref(),
            section_id,
        )
    }
}

/// Values shown in the form fields
#[derive(Serialize, Default)]
struct FormValues<'a> {
    term: &'a str,
    definition: &'a str,
    comment: &'a str,
}

/// One `<option>` of the section selector
#[derive(Serialize)]
struct SectionChoice<'a> {
    id: i64,
    name: &'a str,
    selected: bool,
}

fn section_choices(sections: &[Section], selected: Option<i64>) -> Vec<SectionChoice<'_>> {
    sections
        .iter()
        .map(|s| SectionChoice {
            id: s.id,
            name: &s.name,
            selected: Some(s.id) == selected,
        })
        .collect()
}

/// GET /term/{id} - term detail
async fn term_detail(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Html<String>, ApiError> {
    let entry = TermRepo::new(state.db.pool()).get(id).await?;
    let section = SectionRepo::new(state.db.pool()).get(entry.section_id).await?;

    let html = state.renderer.render(
        "detail",
        &json!({
            "title": entry.term,
            "entry": entry,
            "section": section,
        }),
    )?;
    Ok(Html(html))
}

/// GET /add - empty term form with section choices
async fn add_term_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let sections = SectionRepo::new(state.db.pool()).list().await?;

    let html = state.renderer.render(
        "term_form",
        &json!({
            "title": "Add term",
            "action": "/add",
            "form": FormValues::default(),
            "sections": section_choices(&sections, None),
        }),
    )?;
    Ok(Html(html))
}

/// POST /add - create a term
async fn add_term(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TermForm>,
) -> Result<Redirect, ApiError> {
    let input = form.into_input()?;
    TermRepo::new(state.db.pool()).create(&input).await?;

    Ok(Redirect::to("/"))
}

/// GET /edit/{id} - term form pre-filled with the stored values
async fn edit_term_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Html<String>, ApiError> {
    let term: Term = TermRepo::new(state.db.pool()).get(id).await?;
    let sections = SectionRepo::new(state.db.pool()).list().await?;

    let html = state.renderer.render(
        "term_form",
        &json!({
            "title": format!("Edit {}", term.term),
            "action": format!("/edit/{}", term.id),
            "form": FormValues {
                term: &term.term,
                definition: &term.definition,
                comment: term.comment.as_deref().unwrap_or_default(),
            },
            "sections": section_choices(&sections, Some(term.section_id)),
        }),
    )?;
    Ok(Html(html))
}

/// POST /edit/{id} - overwrite a term
async fn edit_term(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    Form(form): Form<TermForm>,
) -> Result<Redirect, ApiError> {
    let repo = TermRepo::new(state.db.pool());
    // an unknown id wins over bad input
    repo.get(id).await?;

    let input = form.into_input()?;
    repo.update(id, &input).await?;

    Ok(Redirect::to("/"))
}

/// POST /delete/{id} - delete a term
async fn delete_term(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Redirect, ApiError> {
    TermRepo::new(state.db.pool()).delete(id).await?;
    Ok(Redirect::to("/"))
}

/// Term routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/term/{id}", get(term_detail))
        .route("/add", get(add_term_form).post(add_term))
        .route("/edit/{id}", get(edit_term_form).post(edit_term))
        .route("/delete/{id}", post(delete_term))
}
