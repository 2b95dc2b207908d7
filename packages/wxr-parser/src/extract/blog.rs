//! Channel-level blog metadata.

use roxmltree::Node;

use crate::config::Namespace;
use crate::types::BlogInfo;
use crate::xml::child_text;

/// Extract blog metadata from the channel element.
///
/// URLs are taken as written; no well-formedness checks are applied.
pub fn parse_blog(channel: Node<'_, '_>) -> BlogInfo {
    BlogInfo {
        title: child_text(channel, None, "title"),
        tagline: child_text(channel, None, "description"),
        language: child_text(channel, None, "language"),
        site_url: child_text(channel, Some(Namespace::Wp), "base_site_url"),
        blog_url: child_text(channel, Some(Namespace::Wp), "base_blog_url"),
    }
}
