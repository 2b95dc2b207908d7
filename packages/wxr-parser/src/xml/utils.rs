//! XML utility functions for navigating and extracting data from DOM trees.
//!
//! Lookups are namespace-exact: `None` only matches elements without a
//! namespace, so `<category>` and `<wp:category>` never shadow each other.

use roxmltree::Node;

use crate::config::Namespace;
use crate::error::{Result, WxrError};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use wxr_parser::xml::get_tag_name;
///
/// let xml = r#"<wp:tag xmlns:wp="http://wordpress.org/export/1.2/"/>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "tag");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Check if a node is an element with the given namespace and local name.
pub fn has_tag(node: Node<'_, '_>, ns: Option<Namespace>, tag: &str) -> bool {
    node.is_element()
        && get_tag_name(node) == tag
        && node.tag_name().namespace() == ns.map(|ns| ns.uri())
}

/// Find the first child element with the given namespace and tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use wxr_parser::config::Namespace;
/// use wxr_parser::xml::find_child;
///
/// let xml = r#"<item xmlns:wp="http://wordpress.org/export/1.2/">
///     <category>plain</category>
///     <wp:post_id>7</wp:post_id>
/// </item>"#;
/// let doc = Document::parse(xml).unwrap();
/// let item = doc.root_element();
///
/// assert!(find_child(item, Some(Namespace::Wp), "post_id").is_some());
/// assert!(find_child(item, None, "post_id").is_none());
/// assert!(find_child(item, Some(Namespace::Wp), "category").is_none());
/// ```
pub fn find_child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: Option<Namespace>,
    tag: &str,
) -> Option<Node<'a, 'input>> {
    node.children().find(|child| has_tag(*child, ns, tag))
}

/// Find all child elements with the given namespace and tag name, in document order.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    ns: Option<Namespace>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| has_tag(*child, ns, tag))
}

/// Find a required child element, failing with a structural error if absent.
pub fn require_child<'a, 'input>(
    node: Node<'a, 'input>,
    ns: Option<Namespace>,
    tag: &str,
) -> Result<Node<'a, 'input>> {
    find_child(node, ns, tag).ok_or_else(|| WxrError::MissingElement {
        element: match ns {
            Some(ns) => format!("{}:{tag}", ns.prefix()),
            None => tag.to_string(),
        },
        context: get_tag_name(node).to_string(),
    })
}

/// Get the text content of a node, untrimmed.
///
/// Returns `None` for elements without text, including empty elements and
/// empty CDATA sections.
pub fn node_text(node: Node<'_, '_>) -> Option<String> {
    node.text()
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Get the text of the first matching child element.
///
/// This is the accessor every field extractor goes through: a missing child
/// and an empty child both yield `None`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use wxr_parser::config::Namespace;
/// use wxr_parser::xml::child_text;
///
/// let xml = r#"<wp:category xmlns:wp="http://wordpress.org/export/1.2/">
///     <wp:category_nicename>news</wp:category_nicename>
///     <wp:category_parent></wp:category_parent>
/// </wp:category>"#;
/// let doc = Document::parse(xml).unwrap();
/// let category = doc.root_element();
///
/// assert_eq!(
///     child_text(category, Some(Namespace::Wp), "category_nicename"),
///     Some("news".to_string())
/// );
/// assert_eq!(child_text(category, Some(Namespace::Wp), "category_parent"), None);
/// assert_eq!(child_text(category, Some(Namespace::Wp), "cat_name"), None);
/// ```
pub fn child_text(node: Node<'_, '_>, ns: Option<Namespace>, tag: &str) -> Option<String> {
    find_child(node, ns, tag).and_then(node_text)
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}
