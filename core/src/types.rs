//! Schema type definitions for form structure modeling.
//!
//! This module defines the core data model used to represent parsed form
//! definitions. The types are designed for serialization with [`serde`] and
//! round-trip through JSON and YAML unchanged.

use serde::{Deserialize, Serialize};

/// Semantic kind of a form field, independent of the required suffix.
///
/// Derived from a tag's type token by stripping the trailing `*`. Unknown
/// tokens degrade to [`BaseType::Text`] so catalog construction never
/// rejects a tag.
///
/// # Examples
///
/// ```
/// use form_schema_core::BaseType;
///
/// assert_eq!(BaseType::from_token("text*"), BaseType::Text);
/// assert_eq!(BaseType::from_token("select"), BaseType::Select);
/// assert_eq!(BaseType::from_token("frobnicate"), BaseType::Text);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BaseType {
    /// Single-line text input (the default and the unknown-token fallback).
    #[default]
    Text,
    /// Numeric input.
    Number,
    /// Multi-line text input.
    Textarea,
    /// Date input.
    Date,
    /// Email address input.
    Email,
    /// Telephone number input.
    Tel,
    /// URL input.
    Url,
    /// File upload input.
    File,
    /// Drop-down selection.
    Select,
    /// Checkbox group.
    Checkbox,
    /// Radio button group.
    Radio,
    /// Acceptance checkbox wrapping consent text.
    Acceptance,
    /// Quiz question with hidden answers.
    Quiz,
    /// Submit control.
    Submit,
    /// Hidden value carrier, never rendered.
    Hidden,
    /// Response output placeholder, never rendered.
    Response,
}

impl BaseType {
    /// Resolves a type token (possibly `*`-suffixed) to its base type.
    pub fn from_token(token: &str) -> Self {
        match token.trim_end_matches('*').to_ascii_lowercase().as_str() {
            "number" => Self::Number,
            "textarea" => Self::Textarea,
            "date" => Self::Date,
            "email" => Self::Email,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "file" => Self::File,
            "select" => Self::Select,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "acceptance" => Self::Acceptance,
            "quiz" => Self::Quiz,
            "submit" => Self::Submit,
            "hidden" => Self::Hidden,
            "response" => Self::Response,
            _ => Self::Text,
        }
    }

    /// Wire-format name of this type (matches the serde representation).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Textarea => "textarea",
            Self::Date => "date",
            Self::Email => "email",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::File => "file",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Acceptance => "acceptance",
            Self::Quiz => "quiz",
            Self::Submit => "submit",
            Self::Hidden => "hidden",
            Self::Response => "response",
        }
    }

    /// Types whose tags carry a value list that expands into options.
    pub fn has_value_list(self) -> bool {
        matches!(
            self,
            Self::Select | Self::Checkbox | Self::Radio | Self::Acceptance | Self::Quiz
        )
    }

    /// Types that describe form plumbing rather than an input field.
    ///
    /// Structural tags are skipped when resolved through the catalog; submit
    /// controls are emitted through the unmatched-tag path instead.
    pub fn is_structural(self) -> bool {
        matches!(self, Self::Submit | Self::Hidden | Self::Response)
    }

    /// Types whose default value comes from a quoted literal in the tag text.
    pub fn takes_literal_default(self) -> bool {
        matches!(
            self,
            Self::Text
                | Self::Number
                | Self::Textarea
                | Self::Date
                | Self::Email
                | Self::Tel
                | Self::Url
                | Self::File
        )
    }
}

/// A scanned form tag as supplied by the form-definition provider.
///
/// This is the collaborator-boundary struct: the parser core never inspects
/// provider objects directly, it receives plain `RawTag`s. The type token
/// keeps its `*` suffix; `raw_options` are the unquoted option tokens and
/// `values` the quoted literals, in source order.
///
/// # Examples
///
/// ```
/// use form_schema_core::{BaseType, RawTag};
///
/// let tag = RawTag::new("menu-item", "select*")
///     .with_option("include_blank")
///     .with_value("Option A|a");
///
/// assert!(tag.is_required());
/// assert_eq!(tag.base_type(), BaseType::Select);
/// assert!(tag.has_option("include_blank"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTag {
    /// Field name (empty for nameless tags such as bare `[submit]`).
    pub name: String,
    /// Type token, possibly `*`-suffixed (e.g. "text*").
    pub type_token: String,
    /// Unquoted option tokens after the name, in source order.
    pub raw_options: Vec<String>,
    /// Quoted value literals, in source order.
    pub values: Vec<String>,
}

impl RawTag {
    /// Creates a tag with the given name and type token.
    pub fn new(name: &str, type_token: &str) -> Self {
        Self {
            name: name.to_string(),
            type_token: type_token.to_string(),
            raw_options: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Appends an option token.
    pub fn with_option(mut self, option: &str) -> Self {
        self.raw_options.push(option.to_string());
        self
    }

    /// Appends a value literal.
    pub fn with_value(mut self, value: &str) -> Self {
        self.values.push(value.to_string());
        self
    }

    /// Base type resolved from the type token.
    pub fn base_type(&self) -> BaseType {
        BaseType::from_token(&self.type_token)
    }

    /// Whether the type token carries the required suffix.
    pub fn is_required(&self) -> bool {
        self.type_token.ends_with('*')
    }

    /// Whether `option` appears among the raw option tokens.
    pub fn has_option(&self, option: &str) -> bool {
        self.raw_options.iter().any(|o| o == option)
    }
}

/// One selectable option of a list-typed field.
///
/// A `None` value marks the blank placeholder option prepended for
/// `include_blank`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    /// Visible option label.
    pub label: String,
    /// Submitted value; absent for the blank placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FieldOption {
    /// Creates an option from a label and an optional value.
    pub fn new(label: &str, value: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value: value.map(String::from),
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A resolved input field of the form schema.
///
/// The base type serializes as `tag_type` because the enclosing
/// [`SchemaElement`] already uses `type` as its variant discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldElement {
    /// Field name from the tag.
    pub name: String,
    /// Base type of the field.
    pub tag_type: BaseType,
    /// Associated label text, if a label run was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Whether the field must be filled in.
    pub required: bool,
    /// Options for list-typed fields; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    /// Pre-filled value, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Lower bound from `min:`/`minlength:` options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Upper bound from `max:`/`maxlength:` options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    /// Whether the field accepts multiple values.
    #[serde(default, skip_serializing_if = "is_false")]
    pub multiple: bool,
}

impl FieldElement {
    /// Creates a field with the given name and type; everything else is
    /// optional/empty and not required.
    pub fn new(name: &str, tag_type: BaseType) -> Self {
        Self {
            name: name.to_string(),
            tag_type,
            label: None,
            required: false,
            options: Vec::new(),
            default_value: None,
            min: None,
            max: None,
            multiple: false,
        }
    }
}

/// One element of the parsed form schema, in source order.
///
/// Serializes with a `type` discriminator: `text_block` carries only
/// `content`, `submit` only `label`, and `field` the flattened
/// [`FieldElement`].
///
/// # Examples
///
/// ```
/// use form_schema_core::SchemaElement;
///
/// let block = SchemaElement::text("Please fill in the form.");
/// let json = serde_json::to_string(&block).unwrap();
/// assert_eq!(json, r#"{"type":"text_block","content":"Please fill in the form."}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchemaElement {
    /// A literal block of author text.
    TextBlock {
        /// Trimmed text content.
        content: String,
    },
    /// A resolved input field.
    Field(FieldElement),
    /// A submit control.
    Submit {
        /// Button caption.
        label: String,
    },
}

impl SchemaElement {
    /// Creates a text block element.
    pub fn text(content: &str) -> Self {
        Self::TextBlock {
            content: content.to_string(),
        }
    }

    /// Creates a submit element.
    pub fn submit(label: &str) -> Self {
        Self::Submit {
            label: label.to_string(),
        }
    }

    /// Returns the field payload when this element is a field.
    pub fn as_field(&self) -> Option<&FieldElement> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    /// Whether this element is a text block.
    pub fn is_text_block(&self) -> bool {
        matches!(self, Self::TextBlock { .. })
    }
}
