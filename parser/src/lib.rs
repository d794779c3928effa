//! Form-definition markup parsing.
//!
//! This crate extracts an ordered, structured schema from a form definition
//! written in a small shortcode grammar: free text, HTML `<label>` wrappers,
//! and bracketed field tags such as `[text* your-name "default"]`. Parsing
//! runs in three stages:
//!
//! - [`catalog`] — indexes the provider-supplied tags by field name
//!   (ordered-unique, last wins).
//! - [`tokenizer`] — splits the definition into text, label, and tag parts
//!   with a single left-to-right scan.
//! - [`resolver`] — merges parts and catalog into the final
//!   [`SchemaElement`] sequence.
//!
//! The parser is permissive: malformed markup degrades to text blocks and
//! never aborts a parse. It holds no shared state, performs no I/O, and is
//! safe to call concurrently from multiple threads.
//!
//! # Example
//!
//! ```
//! use form_schema_core::{BaseType, RawTag};
//! use form_schema_parser::parse_form;
//!
//! let definition = "<label>Name</label>[text* your-name \"John\"]";
//! let tags = vec![RawTag::new("your-name", "text*")];
//!
//! let elements = parse_form(definition, &tags);
//! assert_eq!(elements.len(), 1);
//!
//! let field = elements[0].as_field().unwrap();
//! assert_eq!(field.tag_type, BaseType::Text);
//! assert!(field.required);
//! assert_eq!(field.label.as_deref(), Some("Name"));
//! assert_eq!(field.default_value.as_deref(), Some("John"));
//! ```
//!
//! [`SchemaElement`]: form_schema_core::SchemaElement

pub mod catalog;
pub mod options;
pub mod resolver;
pub mod tokenizer;

use form_schema_core::{RawTag, SchemaElement};

use crate::catalog::TagCatalog;
use crate::resolver::ElementResolver;

/// Parses a form definition against its scanned tags.
///
/// The tags come from the form-definition provider; the parser itself only
/// performs the bracket/label tokenization and takes tag semantics (type,
/// required suffix, options, values) as given. Parsing the same inputs
/// twice yields element-wise equal output.
pub fn parse_form(definition: &str, tags: &[RawTag]) -> Vec<SchemaElement> {
    let catalog = TagCatalog::from_raw_tags(tags);
    let parts = tokenizer::tokenize(definition);
    tracing::debug!(
        parts = parts.len(),
        tags = catalog.len(),
        "resolving form definition"
    );
    ElementResolver::new(&catalog).resolve(&parts)
}
