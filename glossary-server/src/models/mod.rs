//! Domain models with validation at construction
//!
//! All form input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod section;
pub mod term;
pub mod validation;

pub use section::SectionName;
pub use term::{parse_section_id, Definition, TermInput, TermText};
pub use validation::ValidationError;
