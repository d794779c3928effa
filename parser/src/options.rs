//! The per-tag option mini-language.
//!
//! Tags carry a compact option vocabulary: bare markers (`include_blank`,
//! `multiple`, `exclusive`, `optional`), prefixed tokens (`default:2`,
//! `min:10`, `maxlength:80`), quoted value literals, and `label|value`
//! encoded options. The helpers here turn those tokens into typed data.

use form_schema_core::FieldOption;
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder label rendered for the `include_blank` leading option.
pub const BLANK_OPTION_LABEL: &str = "---";

/// Caption used for submit controls that carry no quoted label.
pub const DEFAULT_SUBMIT_LABEL: &str = "Send";

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("static regex must compile"));
static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex must compile"));

/// First double-quoted literal inside a raw tag text, if any.
pub fn first_quoted_literal(raw: &str) -> Option<String> {
    QUOTED_RE
        .captures(raw)
        .map(|captures| captures[1].to_string())
}

/// Removes HTML tags from a string, leaving the text content.
pub fn strip_html(text: &str) -> String {
    HTML_TAG_RE.replace_all(text, "").into_owned()
}

/// Splits a `label|value` encoded option; a value without a pipe doubles
/// as its own label.
pub fn split_option_value(value: &str) -> FieldOption {
    match value.split_once('|') {
        Some((label, encoded)) => FieldOption::new(label, Some(encoded)),
        None => FieldOption::new(value, Some(value)),
    }
}

/// Payload of the first `default:` option token, if any.
///
/// The payload is returned untouched; index resolution against the value
/// list is the resolver's business.
pub fn find_default_token(options: &[String]) -> Option<String> {
    options.iter().find_map(|option| {
        let rest = option.strip_prefix("default:")?;
        if rest.is_empty() {
            return None;
        }
        Some(rest.to_string())
    })
}

/// First integer bound among the options, trying `primary` tokens before
/// `fallback` tokens (e.g. `min:` before `minlength:`).
pub fn find_bound(options: &[String], primary: &str, fallback: &str) -> Option<i64> {
    bound_token(options, primary).or_else(|| bound_token(options, fallback))
}

fn bound_token(options: &[String], prefix: &str) -> Option<i64> {
    options
        .iter()
        .find_map(|option| option.strip_prefix(prefix)?.parse().ok())
}
