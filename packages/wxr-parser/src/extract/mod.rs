//! Extraction stages, one per section of the channel.
//!
//! Each stage reads from the `<channel>` element (or an `<item>` below it)
//! and is independent of the others.

mod authors;
mod blog;
mod comments;
mod postmeta;
mod posts;
mod taxonomy;

pub use authors::parse_authors;
pub use blog::parse_blog;
pub use comments::parse_comments;
pub use postmeta::{parse_postmeta, ATTACHED_FILE_KEY, ATTACHMENT_METADATA_KEY};
pub use posts::{parse_post, parse_posts};
pub use taxonomy::{build_category_tree, parse_categories, parse_tags};
