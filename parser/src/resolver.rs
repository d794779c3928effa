//! Element resolution: tokenized parts plus the tag catalog become the
//! final ordered sequence of schema elements.
//!
//! Resolution is a single pass over the parts. A label run with no embedded
//! tag becomes the pending label for the next resolved field; a label run
//! with embedded tags resolves them in place. Tags without a catalog entry
//! degrade to a submit control or a text block, never to an error: the
//! input is author-written markup the parser cannot reject outright.

use form_schema_core::{BaseType, FieldElement, FieldOption, SchemaElement};
use tracing::debug;

use crate::catalog::{FieldTag, TagCatalog};
use crate::options::{self, BLANK_OPTION_LABEL, DEFAULT_SUBMIT_LABEL};
use crate::tokenizer::{self, Part};

/// Resolves parts against a tag catalog.
pub struct ElementResolver<'a> {
    catalog: &'a TagCatalog,
}

impl<'a> ElementResolver<'a> {
    /// Creates a resolver over the given catalog.
    pub fn new(catalog: &'a TagCatalog) -> Self {
        Self { catalog }
    }

    /// Produces the ordered schema elements for the given parts.
    ///
    /// Each part yields zero or one element; emitted order matches the
    /// left-to-right order of the source spans. A pending label that never
    /// finds its field is flushed as a text block, so no author text is
    /// silently dropped.
    pub fn resolve(&self, parts: &[Part]) -> Vec<SchemaElement> {
        let mut elements = Vec::new();
        let mut pending_label: Option<String> = None;

        for part in parts {
            match part {
                Part::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        elements.push(SchemaElement::text(trimmed));
                    }
                }
                Part::Label(raw) => {
                    self.resolve_label(raw, &mut pending_label, &mut elements);
                }
                Part::Tag { raw, matched_close } => {
                    self.resolve_tag(raw, *matched_close, &mut pending_label, &mut elements);
                }
            }
        }

        if let Some(label) = pending_label {
            elements.push(SchemaElement::text(&label));
        }
        elements
    }

    fn resolve_label(
        &self,
        raw: &str,
        pending: &mut Option<String>,
        out: &mut Vec<SchemaElement>,
    ) {
        let mut label_text = String::new();
        let mut embedded: Vec<(String, bool)> = Vec::new();
        for part in tokenizer::tokenize(tokenizer::label_body(raw)) {
            match part {
                Part::Text(text) | Part::Label(text) => label_text.push_str(&text),
                Part::Tag { raw, matched_close } => embedded.push((raw, matched_close)),
            }
        }

        let stripped = options::strip_html(&label_text);
        let label = Some(stripped.trim())
            .filter(|l| !l.is_empty())
            .map(String::from);

        if embedded.is_empty() {
            if label.is_some() {
                self.stash_label(label, pending, out);
            }
            return;
        }

        // the label text belongs to the first field inside this run and
        // must not leak to fields that follow the run
        self.stash_label(label, pending, out);
        let insert_at = out.len();
        for (tag_raw, matched_close) in &embedded {
            self.resolve_tag(tag_raw, *matched_close, pending, out);
        }
        if let Some(rest) = pending.take() {
            out.insert(insert_at, SchemaElement::text(&rest));
        }
    }

    /// Replaces the pending label, flushing the displaced one as text.
    fn stash_label(
        &self,
        label: Option<String>,
        pending: &mut Option<String>,
        out: &mut Vec<SchemaElement>,
    ) {
        let displaced = std::mem::replace(pending, label);
        if let Some(previous) = displaced {
            out.push(SchemaElement::text(&previous));
        }
    }

    fn resolve_tag(
        &self,
        raw: &str,
        matched_close: bool,
        pending: &mut Option<String>,
        out: &mut Vec<SchemaElement>,
    ) {
        let Some(open) = OpenTag::parse(raw) else {
            out.push(SchemaElement::text(raw.trim()));
            return;
        };

        match open.name.and_then(|name| self.catalog.get(name)) {
            Some(tag) if tag.base_type.is_structural() => {
                debug!(name = %tag.name, kind = tag.base_type.as_str(), "skipping structural tag");
            }
            Some(tag) => {
                let label = pending.take();
                out.push(SchemaElement::Field(build_field(
                    tag,
                    raw,
                    matched_close,
                    label,
                )));
            }
            None if open.is_submit() => {
                let label = options::first_quoted_literal(raw)
                    .unwrap_or_else(|| DEFAULT_SUBMIT_LABEL.to_string());
                out.push(SchemaElement::submit(&label));
            }
            None => {
                debug!(raw, "tag without catalog entry kept as text");
                out.push(SchemaElement::text(raw.trim()));
            }
        }
    }
}

/// The open bracket of a tag run, split into its leading tokens.
struct OpenTag<'s> {
    type_token: &'s str,
    name: Option<&'s str>,
}

impl<'s> OpenTag<'s> {
    fn parse(raw: &'s str) -> Option<Self> {
        let inner = raw.strip_prefix('[')?;
        let inner = &inner[..inner.find(']')?];
        let mut tokens = inner.split_whitespace();
        let type_token = tokens.next()?;
        Some(Self {
            type_token,
            name: tokens.next(),
        })
    }

    fn is_submit(&self) -> bool {
        self.type_token.starts_with("submit")
    }
}

fn build_field(
    tag: &FieldTag,
    raw: &str,
    matched_close: bool,
    pending_label: Option<String>,
) -> FieldElement {
    let wrapped = if matched_close { wrapped_text(raw) } else { None };
    let wrapped_label = wrapped.map(|text| options::strip_html(text).trim().to_string());

    let required = tag.required
        || (tag.base_type == BaseType::Acceptance && !tag.has_option("optional"));

    let label = if tag.base_type == BaseType::Acceptance {
        wrapped_label
            .clone()
            .filter(|l| !l.is_empty())
            .or(pending_label)
    } else {
        pending_label
    };

    let options = match tag.base_type {
        BaseType::Acceptance => {
            vec![FieldOption::new(
                wrapped_label.as_deref().unwrap_or(""),
                Some("on"),
            )]
        }
        BaseType::Select | BaseType::Checkbox | BaseType::Radio | BaseType::Quiz => {
            let mut options: Vec<FieldOption> = tag
                .values
                .iter()
                .map(|value| {
                    let mut option = options::split_option_value(value);
                    if tag.base_type == BaseType::Checkbox {
                        option.value = Some("on".to_string());
                    }
                    option
                })
                .collect();
            if tag.base_type == BaseType::Select && tag.has_option("include_blank") {
                options.insert(0, FieldOption::new(BLANK_OPTION_LABEL, None));
            }
            options
        }
        _ => Vec::new(),
    };

    let default_value = match options::find_default_token(&tag.raw_options) {
        Some(token) => resolve_default(tag, &token),
        None if tag.base_type.takes_literal_default() => options::first_quoted_literal(raw),
        None => None,
    };

    FieldElement {
        name: tag.name.clone(),
        tag_type: tag.base_type,
        label,
        required,
        options,
        default_value,
        min: options::find_bound(&tag.raw_options, "min:", "minlength:"),
        max: options::find_bound(&tag.raw_options, "max:", "maxlength:"),
        multiple: tag.has_option("multiple")
            || tag.base_type == BaseType::Quiz
            || (tag.base_type == BaseType::Checkbox && !tag.has_option("exclusive")),
    }
}

/// Resolves a `default:` payload: an all-digit payload is a 1-based index
/// into the value list for list-typed bases, anything else is verbatim.
fn resolve_default(tag: &FieldTag, token: &str) -> Option<String> {
    if tag.base_type.has_value_list() && token.bytes().all(|b| b.is_ascii_digit()) {
        let index: usize = token.parse().ok()?;
        if index == 0 {
            return None;
        }
        return tag.values.get(index - 1).cloned();
    }
    Some(token.to_string())
}

/// Text wrapped between a matched open tag and its close tag.
fn wrapped_text(raw: &str) -> Option<&str> {
    let open_end = raw.find(']')? + 1;
    let close_start = raw.rfind("[/")?;
    if close_start < open_end {
        return None;
    }
    Some(&raw[open_end..close_start])
}
