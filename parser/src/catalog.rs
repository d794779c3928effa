//! Tag catalog construction.
//!
//! The catalog indexes the provider-supplied [`RawTag`]s by field name so
//! the resolver can merge tag data into the parts it encounters. It is an
//! ordered-unique mapping: insertion order is preserved and a duplicate
//! name replaces the earlier entry (last wins).

use form_schema_core::{BaseType, RawTag};
use indexmap::IndexMap;

/// A resolved field tag, owned by the catalog and looked up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTag {
    /// Field name.
    pub name: String,
    /// Base type resolved from the type token.
    pub base_type: BaseType,
    /// Whether the type token carried the required suffix.
    pub required: bool,
    /// Unquoted option tokens, in source order.
    pub raw_options: Vec<String>,
    /// Quoted value literals, in source order.
    pub values: Vec<String>,
}

impl FieldTag {
    /// Resolves a provider tag into its catalog form.
    pub fn from_raw(raw: &RawTag) -> Self {
        Self {
            name: raw.name.clone(),
            base_type: raw.base_type(),
            required: raw.is_required(),
            raw_options: raw.raw_options.clone(),
            values: raw.values.clone(),
        }
    }

    /// Whether `option` appears among the raw option tokens.
    pub fn has_option(&self, option: &str) -> bool {
        self.raw_options.iter().any(|o| o == option)
    }
}

/// Ordered-unique mapping from field name to resolved tag.
///
/// # Examples
///
/// ```
/// use form_schema_core::RawTag;
/// use form_schema_parser::catalog::TagCatalog;
///
/// let tags = vec![
///     RawTag::new("your-name", "text*"),
///     RawTag::new("your-email", "email"),
/// ];
/// let catalog = TagCatalog::from_raw_tags(&tags);
///
/// assert_eq!(catalog.len(), 2);
/// assert!(catalog.get("your-name").unwrap().required);
/// assert!(catalog.get("missing").is_none());
/// ```
#[derive(Debug, Default)]
pub struct TagCatalog {
    tags: IndexMap<String, FieldTag>,
}

impl TagCatalog {
    /// Builds the catalog from provider tags.
    ///
    /// Nameless tags (e.g. bare `[submit]`) are not addressable and are
    /// skipped. Zero tags yields an empty catalog, which is not an error:
    /// every part then resolves through the text/submit fallbacks.
    pub fn from_raw_tags(raw: &[RawTag]) -> Self {
        let mut tags = IndexMap::new();
        for tag in raw {
            if tag.name.is_empty() {
                continue;
            }
            tags.insert(tag.name.clone(), FieldTag::from_raw(tag));
        }
        Self { tags }
    }

    /// Looks up a tag by field name.
    pub fn get(&self, name: &str) -> Option<&FieldTag> {
        self.tags.get(name)
    }

    /// Whether a tag with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Number of cataloged tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the catalog holds no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let tags = vec![
            RawTag::new("zeta", "text"),
            RawTag::new("alpha", "email"),
            RawTag::new("mid", "number"),
        ];
        let catalog = TagCatalog::from_raw_tags(&tags);

        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let tags = vec![
            RawTag::new("field", "text"),
            RawTag::new("field", "email*"),
        ];
        let catalog = TagCatalog::from_raw_tags(&tags);

        assert_eq!(catalog.len(), 1);
        let tag = catalog.get("field").unwrap();
        assert_eq!(tag.base_type, BaseType::Email);
        assert!(tag.required);
    }

    #[test]
    fn test_nameless_tags_skipped() {
        let tags = vec![RawTag::new("", "submit"), RawTag::new("a", "text")];
        let catalog = TagCatalog::from_raw_tags(&tags);

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("a"));
    }

    #[test]
    fn test_empty_input_is_empty_catalog() {
        let catalog = TagCatalog::from_raw_tags(&[]);
        assert!(catalog.is_empty());
    }
}
