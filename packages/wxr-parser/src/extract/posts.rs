//! Posts: every `<item>` of the channel.

use roxmltree::Node;

use super::comments::parse_comments;
use super::postmeta::parse_postmeta;
use crate::config::Namespace;
use crate::types::{PostRecord, TermGroups, TermRef};
use crate::xml::{child_text, find_children, get_attribute, node_text};

/// Extract all items of the channel in document order.
pub fn parse_posts(channel: Node<'_, '_>) -> Vec<PostRecord> {
    find_children(channel, None, "item").map(parse_post).collect()
}

/// Extract a single item.
pub fn parse_post(item: Node<'_, '_>) -> PostRecord {
    let wp = |tag: &str| child_text(item, Some(Namespace::Wp), tag);

    PostRecord {
        title: child_text(item, None, "title"),
        link: child_text(item, None, "link"),
        pub_date: child_text(item, None, "pubDate"),
        creator: child_text(item, Some(Namespace::Dc), "creator"),
        guid: child_text(item, None, "guid"),
        description: child_text(item, None, "description"),
        content: child_text(item, Some(Namespace::Content), "encoded"),
        excerpt: child_text(item, Some(Namespace::Excerpt), "encoded"),
        post_id: wp("post_id"),
        post_date: wp("post_date"),
        post_date_gmt: wp("post_date_gmt"),
        post_modified: wp("post_modified"),
        post_modified_gmt: wp("post_modified_gmt"),
        status: wp("status"),
        post_parent: wp("post_parent"),
        menu_order: wp("menu_order"),
        post_type: wp("post_type"),
        post_name: wp("post_name"),
        is_sticky: wp("is_sticky"),
        ping_status: wp("ping_status"),
        post_password: wp("post_password"),
        terms: parse_terms(item),
        postmeta: parse_postmeta(item),
        comments: parse_comments(item),
    }
}

/// Group the item's `<category domain=".." nicename="..">` elements by domain.
fn parse_terms(item: Node<'_, '_>) -> TermGroups {
    let mut terms = TermGroups::new();

    for category in find_children(item, None, "category") {
        let Some(domain) = get_attribute(category, "domain") else {
            tracing::warn!(
                post_id = ?child_text(item, Some(Namespace::Wp), "post_id"),
                text = ?node_text(category),
                "Category without domain attribute, skipping"
            );
            continue;
        };

        terms.push(
            domain,
            TermRef {
                nicename: get_attribute(category, "nicename").map(str::to_string),
                text: node_text(category),
            },
        );
    }

    terms
}
