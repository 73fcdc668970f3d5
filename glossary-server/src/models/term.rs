//! Term field validation
//!
//! A term submission carries the term text, its definition, an optional
//! comment and the id of the owning section.

use super::validation::{required_text, ValidationError};

/// Maximum length for term text
pub const MAX_TERM_LEN: usize = 100;

/// Validated term text (the glossary headword)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermText(String);

impl TermText {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        required_text("term", s, MAX_TERM_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated definition; unbounded length but never blank.
///
/// Kept exactly as submitted so indentation and line breaks survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition(String);

impl Definition {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.trim().is_empty() {
            return Err(ValidationError::Empty { field: "definition" });
        }
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything needed to create or overwrite a term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermInput {
    pub term: TermText,
    pub definition: Definition,
    /// `None` when the comment was omitted or blank.
    pub comment: Option<String>,
    pub section_id: i64,
}

impl TermInput {
    pub fn new(
        term: &str,
        definition: &str,
        comment: Option<&str>,
        section_id: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            term: TermText::new(term)?,
            definition: Definition::new(definition)?,
            comment: comment
                .filter(|c| !c.trim().is_empty())
                .map(str::to_owned),
            section_id,
        })
    }
}

/// Parse the `section_id` form field.
pub fn parse_section_id(raw: &str) -> Result<i64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "section_id" });
    }

    raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "section_id",
        reason: "must be an integer",
    })
}
