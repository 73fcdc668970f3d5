//! Section name validation

use super::validation::{required_text, ValidationError};

/// Maximum length for section names
pub const MAX_SECTION_NAME_LEN: usize = 100;

/// Validated section name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionName(String);

impl SectionName {
    /// Create a new section name.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Must not be empty after trimming
    /// - Max 100 characters
    ///
    /// # Example
    /// ```
    /// use glossary_server::models::SectionName;
    ///
    /// assert_eq!(SectionName::new(" Supervised learning ").unwrap().as_str(), "Supervised learning");
    /// assert!(SectionName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        required_text("name", s, MAX_SECTION_NAME_LEN).map(Self)
    }

    /// Get the section name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_free_text() {
        assert!(SectionName::new("Gradient descent").is_ok());
        assert!(SectionName::new("Обучение с учителем").is_ok());
        assert!(SectionName::new("A/B tests & metrics").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = SectionName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }

    #[test]
    fn max_length() {
        let name_100 = "s".repeat(100);
        assert!(SectionName::new(&name_100).is_ok());

        let name_101 = "s".repeat(101);
        let err = SectionName::new(&name_101).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 100, .. }));
    }
}
