//! Core data types for the parser.
//!
//! These types mirror the structure of a WordPress export: blog metadata,
//! authors, taxonomy and the posts themselves. Every optional text field is
//! an `Option<String>` and serializes as `null` when absent.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::config::CATEGORY_DOMAIN_PREFIX;
use crate::php::PhpValue;

/// Complete parse result of one export file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseResult {
    /// Channel-level blog metadata.
    pub blog: BlogInfo,

    /// Authors in document order.
    pub authors: Vec<AuthorRecord>,

    /// Root categories, each carrying its subtree.
    pub categories: Vec<CategoryNode>,

    /// Tags in document order.
    pub tags: Vec<TagRecord>,

    /// Posts, pages and attachments in document order.
    pub posts: Vec<PostRecord>,
}

impl ParseResult {
    /// Total number of categories across the whole forest.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.iter().map(CategoryNode::node_count).sum()
    }

    /// Total number of comments across all posts.
    #[must_use]
    pub fn comment_count(&self) -> usize {
        self.posts.iter().map(|p| p.comments.len()).sum()
    }
}

/// Blog metadata from the channel element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlogInfo {
    pub title: Option<String>,
    pub tagline: Option<String>,
    pub language: Option<String>,
    pub site_url: Option<String>,
    pub blog_url: Option<String>,
}

/// A user account that authored content. Posts refer to it through `creator`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorRecord {
    pub login: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A tag term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub term_id: Option<String>,
    pub slug: Option<String>,
    pub name: Option<String>,
}

/// A category and its subcategories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub term_id: Option<String>,

    /// URL-safe identifier, unique per category.
    pub nicename: Option<String>,

    pub name: Option<String>,

    /// Nicename of the parent category, `None` for a root.
    pub parent: Option<String>,

    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Number of nodes in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(CategoryNode::node_count)
            .sum::<usize>()
    }

    /// Find a category by nicename anywhere in this subtree.
    #[must_use]
    pub fn find(&self, nicename: &str) -> Option<&CategoryNode> {
        if self.nicename.as_deref() == Some(nicename) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(nicename))
    }
}

/// A term a post is filed under, as written on the item's `<category>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TermRef {
    pub nicename: Option<String>,
    pub text: Option<String>,
}

/// Post terms grouped by categorization domain (`category`, `post_tag`, ...).
///
/// Domains keep the order of their first appearance in the item. When
/// serialized, each domain becomes a key prefixed with `category_`, so a
/// flattened post never collides with its own scalar fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermGroups {
    groups: Vec<(String, Vec<TermRef>)>,
}

impl TermGroups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term to its domain, creating the domain on first use.
    pub fn push(&mut self, domain: &str, term: TermRef) {
        match self.groups.iter_mut().find(|(d, _)| d == domain) {
            Some((_, terms)) => terms.push(term),
            None => self.groups.push((domain.to_string(), vec![term])),
        }
    }

    /// Terms in a domain, in document order.
    #[must_use]
    pub fn get(&self, domain: &str) -> Option<&[TermRef]> {
        self.groups
            .iter()
            .find(|(d, _)| d == domain)
            .map(|(_, terms)| terms.as_slice())
    }

    /// Nicenames of the terms in a domain.
    ///
    /// # Examples
    /// ```
    /// use wxr_parser::types::{TermGroups, TermRef};
    ///
    /// let mut terms = TermGroups::new();
    /// terms.push("post_tag", TermRef {
    ///     nicename: Some("rust".to_string()),
    ///     text: Some("Rust".to_string()),
    /// });
    /// assert_eq!(terms.nicenames("post_tag"), vec!["rust"]);
    /// assert!(terms.nicenames("category").is_empty());
    /// ```
    #[must_use]
    pub fn nicenames(&self, domain: &str) -> Vec<&str> {
        self.get(domain)
            .unwrap_or_default()
            .iter()
            .filter_map(|t| t.nicename.as_deref())
            .collect()
    }

    /// Domain names in order of first appearance.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(d, _)| d.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TermRef])> {
        self.groups
            .iter()
            .map(|(d, terms)| (d.as_str(), terms.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for TermGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (domain, terms) in &self.groups {
            map.serialize_entry(&format!("{CATEGORY_DOMAIN_PREFIX}{domain}"), terms)?;
        }
        map.end()
    }
}

/// Value of a post metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Raw text, passed through verbatim.
    Text(Option<String>),

    /// Decoded PHP-serialized value.
    Structured(PhpValue),
}

impl MetaValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => text.as_deref(),
            Self::Structured(_) => None,
        }
    }

    #[must_use]
    pub fn as_structured(&self) -> Option<&PhpValue> {
        match self {
            Self::Structured(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

/// Post metadata keyed by meta key.
///
/// Keys keep the order of their first appearance; writing an existing key
/// replaces its value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostMeta {
    entries: Vec<(String, MetaValue)>,
}

impl PostMeta {
    /// Key under which the attachment's relative file path is stored.
    pub const ATTACHED_FILE: &'static str = "attached_file";

    /// Key under which decoded attachment metadata is stored.
    pub const ATTACHMENT_METADATA: &'static str = "attachment_metadata";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) -> Option<MetaValue> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Text of a plain metadata entry.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(MetaValue::as_text)
    }

    /// Relative path of an attachment's file.
    #[must_use]
    pub fn attached_file(&self) -> Option<&str> {
        self.text(Self::ATTACHED_FILE)
    }

    /// Decoded attachment metadata (sizes, dimensions, EXIF data).
    #[must_use]
    pub fn attachment_metadata(&self) -> Option<&PhpValue> {
        self.get(Self::ATTACHMENT_METADATA)
            .and_then(MetaValue::as_structured)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for PostMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// A post, page, attachment or any other item in the export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostRecord {
    pub title: Option<String>,
    pub link: Option<String>,
    pub pub_date: Option<String>,

    /// Login of the author, matching [`AuthorRecord::login`] by convention.
    pub creator: Option<String>,

    pub guid: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub post_id: Option<String>,
    pub post_date: Option<String>,
    pub post_date_gmt: Option<String>,
    pub post_modified: Option<String>,
    pub post_modified_gmt: Option<String>,
    pub status: Option<String>,
    pub post_parent: Option<String>,
    pub menu_order: Option<String>,
    pub post_type: Option<String>,
    pub post_name: Option<String>,
    pub is_sticky: Option<String>,
    pub ping_status: Option<String>,
    pub post_password: Option<String>,

    /// Terms grouped by domain, serialized inline as `category_<domain>` keys.
    #[serde(flatten)]
    pub terms: TermGroups,

    pub postmeta: PostMeta,
    pub comments: Vec<CommentRecord>,
}

/// A comment, pingback or trackback on a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommentRecord {
    pub id: Option<String>,
    pub author: Option<String>,
    pub author_email: Option<String>,
    pub author_url: Option<String>,
    pub author_ip: Option<String>,
    pub date: Option<String>,
    pub date_gmt: Option<String>,
    pub content: Option<String>,
    pub approved: Option<String>,

    /// Empty for regular comments, `pingback` or `trackback` otherwise.
    #[serde(rename = "type")]
    pub comment_type: Option<String>,

    pub parent: Option<String>,
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::php::PhpKey;
    use pretty_assertions::assert_eq;

    fn term(nicename: &str) -> TermRef {
        TermRef {
            nicename: Some(nicename.to_string()),
            text: Some(nicename.to_uppercase()),
        }
    }

    fn category(nicename: &str, children: Vec<CategoryNode>) -> CategoryNode {
        CategoryNode {
            nicename: Some(nicename.to_string()),
            children,
            ..CategoryNode::default()
        }
    }

    #[test]
    fn test_term_groups_preserve_order() {
        let mut terms = TermGroups::new();
        terms.push("post_tag", term("b"));
        terms.push("category", term("a"));
        terms.push("post_tag", term("c"));

        assert_eq!(terms.domains().collect::<Vec<_>>(), vec!["post_tag", "category"]);
        assert_eq!(terms.nicenames("post_tag"), vec!["b", "c"]);
        assert_eq!(terms.len(), 2);
        assert!(terms.get("series").is_none());
    }

    #[test]
    fn test_term_groups_serialize_prefixed() {
        let mut terms = TermGroups::new();
        terms.push("post_tag", term("rust"));
        let json = serde_json::to_value(&terms).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "category_post_tag": [{"nicename": "rust", "text": "RUST"}]
            })
        );
    }

    #[test]
    fn test_post_meta_last_write_wins() {
        let mut meta = PostMeta::new();
        assert!(meta
            .insert("_edit_lock", MetaValue::Text(Some("1".into())))
            .is_none());
        meta.insert("_thumbnail_id", MetaValue::Text(Some("9".into())));
        let previous = meta.insert("_edit_lock", MetaValue::Text(Some("2".into())));

        assert_eq!(previous, Some(MetaValue::Text(Some("1".into()))));
        assert_eq!(meta.text("_edit_lock"), Some("2"));
        assert_eq!(meta.keys().collect::<Vec<_>>(), vec!["_edit_lock", "_thumbnail_id"]);
    }

    #[test]
    fn test_post_meta_accessors() {
        let mut meta = PostMeta::new();
        meta.insert(
            PostMeta::ATTACHED_FILE,
            MetaValue::Text(Some("2014/09/logo.png".into())),
        );
        meta.insert(
            PostMeta::ATTACHMENT_METADATA,
            MetaValue::Structured(PhpValue::Array(vec![(
                PhpKey::String("width".into()),
                PhpValue::Int(10),
            )])),
        );

        assert_eq!(meta.attached_file(), Some("2014/09/logo.png"));
        assert!(meta.attachment_metadata().is_some_and(PhpValue::is_structured));
        assert_eq!(meta.text(PostMeta::ATTACHMENT_METADATA), None);
    }

    #[test]
    fn test_post_meta_serializes_null_text() {
        let mut meta = PostMeta::new();
        meta.insert("_empty", MetaValue::Text(None));
        assert_eq!(
            serde_json::to_string(&meta).unwrap(),
            r#"{"_empty":null}"#
        );
    }

    #[test]
    fn test_category_node_count_and_find() {
        let tree = category(
            "root",
            vec![category("a", vec![category("a1", vec![])]), category("b", vec![])],
        );
        assert_eq!(tree.node_count(), 4);
        assert!(tree.find("a1").is_some());
        assert!(tree.find("zzz").is_none());
    }

    #[test]
    fn test_post_record_flattens_terms() {
        let mut post = PostRecord {
            post_id: Some("1".into()),
            ..PostRecord::default()
        };
        post.terms.push("category", term("news"));

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["post_id"], "1");
        assert_eq!(json["title"], serde_json::Value::Null);
        assert_eq!(json["category_category"][0]["nicename"], "news");
        assert!(json["postmeta"].is_object());
    }

    #[test]
    fn test_comment_type_serialized_as_type() {
        let comment = CommentRecord {
            comment_type: Some("pingback".into()),
            ..CommentRecord::default()
        };
        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["type"], "pingback");
        assert!(json.get("comment_type").is_none());
    }
}
