//! Core schema types for form-definition parsing.
//!
//! This crate defines the foundational types for modeling parsed form
//! definitions:
//!
//! - [`RawTag`] — a scanned form tag as supplied by the definition provider;
//!   the boundary struct the parser consumes.
//! - [`BaseType`] — the semantic kind of a field, independent of the
//!   required suffix.
//! - [`SchemaElement`] — one unit of parser output: a text block, a field,
//!   or a submit control.
//! - [`FieldElement`] / [`FieldOption`] — the field payload with label,
//!   options, default value, bounds, and multiplicity.
//!
//! Validation ([`validate_elements`]) catches structural problems such as
//! empty field names and inverted bounds in resolved output.
//!
//! # Example
//!
//! ```
//! use form_schema_core::{BaseType, FieldElement, SchemaElement};
//!
//! let mut field = FieldElement::new("your-name", BaseType::Text);
//! field.required = true;
//! field.label = Some("Name".to_string());
//!
//! let elements = vec![
//!     SchemaElement::text("Contact us"),
//!     SchemaElement::Field(field),
//!     SchemaElement::submit("Send"),
//! ];
//!
//! assert!(elements[1].as_field().is_some());
//! assert!(form_schema_core::validate_elements(&elements).is_empty());
//! ```

mod types;
mod validate;

pub use types::{BaseType, FieldElement, FieldOption, RawTag, SchemaElement};
pub use validate::{ValidationError, validate_elements};
