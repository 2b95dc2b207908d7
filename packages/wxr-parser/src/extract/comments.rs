//! Comments (`<wp:comment>`) of an item.

use roxmltree::Node;

use crate::config::Namespace;
use crate::types::CommentRecord;
use crate::xml::{child_text, find_children};

/// Extract all comments of an item in document order.
pub fn parse_comments(item: Node<'_, '_>) -> Vec<CommentRecord> {
    find_children(item, Some(Namespace::Wp), "comment")
        .map(parse_comment)
        .collect()
}

fn parse_comment(comment: Node<'_, '_>) -> CommentRecord {
    let wp = |tag: &str| child_text(comment, Some(Namespace::Wp), tag);

    CommentRecord {
        id: wp("comment_id"),
        author: wp("comment_author"),
        author_email: wp("comment_author_email"),
        author_url: wp("comment_author_url"),
        author_ip: wp("comment_author_IP"),
        date: wp("comment_date"),
        date_gmt: wp("comment_date_gmt"),
        content: wp("comment_content"),
        approved: wp("comment_approved"),
        comment_type: wp("comment_type"),
        parent: wp("comment_parent"),
        user_id: wp("comment_user_id"),
    }
}
