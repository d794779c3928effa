//! Part tokenizer for form-definition markup.
//!
//! Splits a normalized definition into an ordered sequence of [`Part`]s:
//! literal text runs, `<label>…</label>` wrapped runs, and bracketed tag
//! runs. Matching is a single left-to-right pass over byte offsets with no
//! backtracking; runs never overlap and no input byte is dropped or
//! duplicated. Close tags are matched by comparing the captured open-tag
//! name, not by regex back-references.

use regex::Regex;
use std::sync::LazyLock;

/// Opening wrapper a label run starts with (matched case-insensitively).
pub const LABEL_OPEN: &str = "<label>";
/// Closing wrapper a label run ends with (matched case-insensitively).
pub const LABEL_CLOSE: &str = "</label>";

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("static regex must compile"));

/// A contiguous span of the normalized definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    /// Literal text between matched runs.
    Text(String),
    /// A `<label>…</label>` run, wrapper included.
    Label(String),
    /// A bracketed tag run. `matched_close` is true when the run extends
    /// through a matching `[/name]` close tag.
    Tag {
        /// The raw tag text, brackets included (and the wrapped inner text
        /// plus close tag when `matched_close` is set).
        raw: String,
        /// Whether a matching close tag was consumed.
        matched_close: bool,
    },
}

/// Strips comments and literal newline characters from a raw definition.
///
/// This must run before any matching: bracket and label matching operate on
/// a single line, so `<!-- … -->` comments (which may span lines) are
/// removed first and remaining `\r`/`\n` characters are deleted outright.
pub fn normalize_definition(definition: &str) -> String {
    COMMENT_RE.replace_all(definition, "").replace(['\r', '\n'], "")
}

/// Tokenizes a raw form definition into ordered parts.
///
/// Empty parts are discarded. Concatenating the returned part texts yields
/// exactly the normalized input.
///
/// # Examples
///
/// ```
/// use form_schema_parser::tokenizer::{Part, tokenize};
///
/// let parts = tokenize("<label>Name</label>[text* your-name]");
/// assert_eq!(parts.len(), 2);
/// assert!(matches!(&parts[0], Part::Label(raw) if raw == "<label>Name</label>"));
/// assert!(matches!(&parts[1], Part::Tag { matched_close: false, .. }));
/// ```
pub fn tokenize(definition: &str) -> Vec<Part> {
    let input = normalize_definition(definition);
    let mut parts = Vec::new();
    let mut consumed = 0;
    let mut cursor = 0;

    while cursor < input.len() {
        let Some(step) = input[cursor..].find(['<', '[']) else {
            break;
        };
        let at = cursor + step;
        match match_run(&input, at) {
            Some((part, end)) => {
                if at > consumed {
                    push_text(&mut parts, &input[consumed..at]);
                }
                parts.push(part);
                consumed = end;
                cursor = end;
            }
            // candidate byte opens nothing here; it belongs to a text run
            None => cursor = at + 1,
        }
    }
    if consumed < input.len() {
        push_text(&mut parts, &input[consumed..]);
    }

    tracing::debug!(parts = parts.len(), bytes = input.len(), "tokenized definition");
    parts
}

/// Extracts the body of a label run (the text between the wrappers).
pub fn label_body(raw: &str) -> &str {
    let start = LABEL_OPEN.len().min(raw.len());
    let end = raw.len().saturating_sub(LABEL_CLOSE.len()).max(start);
    &raw[start..end]
}

fn push_text(parts: &mut Vec<Part>, text: &str) {
    if !text.is_empty() {
        parts.push(Part::Text(text.to_string()));
    }
}

fn match_run(input: &str, at: usize) -> Option<(Part, usize)> {
    match input.as_bytes()[at] {
        b'<' => match_label(input, at),
        b'[' => match_tag(input, at),
        _ => None,
    }
}

fn match_label(input: &str, at: usize) -> Option<(Part, usize)> {
    if !starts_with_ci(&input[at..], LABEL_OPEN) {
        return None;
    }
    let body = at + LABEL_OPEN.len();
    let rel = find_ci(&input[body..], LABEL_CLOSE)?;
    let end = body + rel + LABEL_CLOSE.len();
    Some((Part::Label(input[at..end].to_string()), end))
}

fn match_tag(input: &str, at: usize) -> Option<(Part, usize)> {
    let bytes = input.as_bytes();
    let mut i = at + 1;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    if i == at + 1 {
        // a bracket with no name character ([/foo], [ x], [[) is plain text
        return None;
    }
    let name_end = i;
    while i < bytes.len() && bytes[i] != b']' {
        i += 1;
    }
    if i == bytes.len() {
        return None;
    }
    let open_end = i + 1;

    let name = &input[at + 1..name_end];
    let close = format!("[/{name}]");
    if let Some(rel) = find_ci(&input[open_end..], &close) {
        let end = open_end + rel + close.len();
        return Some((
            Part::Tag {
                raw: input[at..end].to_string(),
                matched_close: true,
            },
            end,
        ));
    }

    Some((
        Part::Tag {
            raw: input[at..open_end].to_string(),
            matched_close: false,
        },
        open_end,
    ))
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn starts_with_ci(haystack: &str, needle: &str) -> bool {
    haystack.len() >= needle.len()
        && haystack.as_bytes()[..needle.len()].eq_ignore_ascii_case(needle.as_bytes())
}

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}
