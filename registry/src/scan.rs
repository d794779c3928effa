//! Tag scanning: the definition provider's view of bracketed tags.
//!
//! The parser core never scans for tags itself; it receives [`RawTag`]s
//! from the provider. This module is that provider-side scanner: it walks
//! the normalized definition, finds every open tag, and splits its content
//! into type token, name, option tokens, and quoted values.

use form_schema_core::RawTag;
use form_schema_parser::tokenizer::normalize_definition;

/// Scans a form definition for its tags, in source order.
///
/// Quoted tokens become `values`, the first unquoted token after the type
/// token becomes the `name`, and remaining unquoted tokens become
/// `raw_options`. Close tags (`[/name]`) and brackets without a leading
/// name character are not tags and are skipped.
///
/// # Examples
///
/// ```
/// use form_schema_registry::scan_form_tags;
///
/// let tags = scan_form_tags(r#"[select* menu include_blank "Option A|a"]"#);
/// assert_eq!(tags.len(), 1);
/// assert_eq!(tags[0].name, "menu");
/// assert_eq!(tags[0].type_token, "select*");
/// assert_eq!(tags[0].raw_options, vec!["include_blank"]);
/// assert_eq!(tags[0].values, vec!["Option A|a"]);
/// ```
pub fn scan_form_tags(definition: &str) -> Vec<RawTag> {
    let input = normalize_definition(definition);
    let mut tags = Vec::new();
    let mut cursor = 0;

    while cursor < input.len() {
        let Some(step) = input[cursor..].find('[') else {
            break;
        };
        let at = cursor + step;
        match match_open_tag(&input, at) {
            Some((inner, end)) => {
                if let Some(tag) = parse_raw_tag(inner) {
                    tags.push(tag);
                }
                cursor = end;
            }
            None => cursor = at + 1,
        }
    }

    tracing::debug!(tags = tags.len(), "scanned form definition");
    tags
}

/// Matches a `[...]` open tag at `at`, returning its inner text and the
/// offset past the closing bracket.
fn match_open_tag(input: &str, at: usize) -> Option<(&str, usize)> {
    let bytes = input.as_bytes();
    let mut i = at + 1;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    if i == at + 1 {
        return None;
    }
    while i < bytes.len() && bytes[i] != b']' {
        i += 1;
    }
    if i == bytes.len() {
        return None;
    }
    Some((&input[at + 1..i], i + 1))
}

fn parse_raw_tag(inner: &str) -> Option<RawTag> {
    let mut tokens = attr_tokens(inner).into_iter();
    let type_token = match tokens.next()? {
        Token::Bare(word) => word,
        Token::Quoted(_) => return None,
    };

    let mut tag = RawTag::new("", &type_token);
    for token in tokens {
        match token {
            Token::Quoted(literal) => tag.values.push(literal),
            Token::Bare(word) => {
                if tag.name.is_empty() {
                    tag.name = word;
                } else {
                    tag.raw_options.push(word);
                }
            }
        }
    }
    Some(tag)
}

enum Token {
    Bare(String),
    Quoted(String),
}

/// Splits tag content into whitespace-delimited bare tokens and
/// double-quoted literals.
fn attr_tokens(content: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = content.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '"' {
            chars.next();
            let mut literal = String::new();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                literal.push(c);
            }
            tokens.push(Token::Quoted(literal));
        } else {
            let mut word = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                word.push(c);
                chars.next();
            }
            tokens.push(Token::Bare(word));
        }
    }
    tokens
}
