//! Post metadata (`<wp:postmeta>`).

use roxmltree::Node;

use crate::config::Namespace;
use crate::php::unserialize;
use crate::types::{MetaValue, PostMeta};
use crate::xml::{child_text, find_children};

/// Meta key holding the attachment's path relative to the uploads directory.
pub const ATTACHED_FILE_KEY: &str = "_wp_attached_file";

/// Meta key holding PHP-serialized attachment metadata.
pub const ATTACHMENT_METADATA_KEY: &str = "_wp_attachment_metadata";

/// Extract the metadata of one item.
///
/// `_wp_attached_file` is exposed as `attached_file`, and
/// `_wp_attachment_metadata` is decoded and exposed as `attachment_metadata`.
/// If decoding fails the key is left out and a warning is logged; the rest
/// of the item is unaffected. Every other key is passed through as text;
/// entries without a key are skipped.
pub fn parse_postmeta(item: Node<'_, '_>) -> PostMeta {
    let mut metadata = PostMeta::new();

    for field in find_children(item, Some(Namespace::Wp), "postmeta") {
        let key = child_text(field, Some(Namespace::Wp), "meta_key");
        let value = child_text(field, Some(Namespace::Wp), "meta_value");

        match key.as_deref() {
            Some(ATTACHMENT_METADATA_KEY) => match unserialize(value.as_deref().unwrap_or_default()) {
                Ok(decoded) => {
                    metadata.insert(
                        PostMeta::ATTACHMENT_METADATA,
                        MetaValue::Structured(decoded),
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        post_id = ?child_text(item, Some(Namespace::Wp), "post_id"),
                        %error,
                        "Failed to decode attachment metadata, skipping"
                    );
                }
            },
            Some(ATTACHED_FILE_KEY) => {
                metadata.insert(PostMeta::ATTACHED_FILE, MetaValue::Text(value));
            }
            Some(other) => {
                metadata.insert(other, MetaValue::Text(value));
            }
            None => {
                tracing::debug!(
                    post_id = ?child_text(item, Some(Namespace::Wp), "post_id"),
                    "Postmeta without meta_key, skipping"
                );
            }
        }
    }

    metadata
}
