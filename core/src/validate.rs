//! Structural validation for resolved schema elements.
//!
//! The parser is permissive by design, so validation never runs inside it.
//! Consumers that want to surface suspect output (the CLI does, on stderr)
//! can run [`validate_elements`] over a resolved sequence.

use thiserror::Error;

use crate::types::SchemaElement;

/// A structural problem found in a resolved element sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field element carries an empty name.
    #[error("field has an empty name")]
    EmptyFieldName,

    /// A field's bounds are inverted.
    #[error("field '{name}' has min {min} greater than max {max}")]
    InvertedBounds {
        /// Field name.
        name: String,
        /// Lower bound.
        min: i64,
        /// Upper bound.
        max: i64,
    },

    /// A submit element carries an empty label.
    #[error("submit element has an empty label")]
    EmptySubmitLabel,
}

/// Checks a resolved element sequence for structural problems.
///
/// Returns an empty vector when the sequence is clean.
///
/// # Examples
///
/// ```
/// use form_schema_core::{SchemaElement, validate_elements};
///
/// let elements = vec![SchemaElement::text("intro"), SchemaElement::submit("Send")];
/// assert!(validate_elements(&elements).is_empty());
/// ```
pub fn validate_elements(elements: &[SchemaElement]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for element in elements {
        match element {
            SchemaElement::Field(field) => {
                if field.name.is_empty() {
                    errors.push(ValidationError::EmptyFieldName);
                }
                if let (Some(min), Some(max)) = (field.min, field.max) {
                    if min > max {
                        errors.push(ValidationError::InvertedBounds {
                            name: field.name.clone(),
                            min,
                            max,
                        });
                    }
                }
            }
            SchemaElement::Submit { label } => {
                if label.is_empty() {
                    errors.push(ValidationError::EmptySubmitLabel);
                }
            }
            SchemaElement::TextBlock { .. } => {}
        }
    }
    errors
}
