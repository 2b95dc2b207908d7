//! Parse orchestration: source → XML tree → extraction stages → [`ParseResult`].

use std::fs;
use std::path::Path;

use roxmltree::{Document, ParsingOptions};

use crate::config::{validate_input_size, ParseOptions};
use crate::error::{Result, WxrError};
use crate::extract::{parse_authors, parse_blog, parse_categories, parse_posts, parse_tags};
use crate::types::ParseResult;
use crate::xml::require_child;

/// Parse a WXR export file with default options.
///
/// # Arguments
/// * `path` - Path to the export file
///
/// # Returns
/// The structured content of the export
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseResult> {
    parse_file_with(path, &ParseOptions::default())
}

/// Parse a WXR export file.
///
/// The file is read fully into memory before traversal, so its size is
/// checked against `options.max_input_size` first.
pub fn parse_file_with(path: impl AsRef<Path>, options: &ParseOptions) -> Result<ParseResult> {
    let path = path.as_ref();

    let size = fs::metadata(path)?.len();
    validate_input_size(size, options.max_input_size)?;

    let bytes = fs::read(path)?;
    let xml = String::from_utf8(bytes).map_err(|_| WxrError::InvalidUtf8 {
        context: path.display().to_string(),
    })?;

    tracing::debug!(path = %path.display(), size, "Parsing export file");
    parse_str(&xml)
}

/// Parse WXR content held in memory. A DOCTYPE declaration is accepted.
///
/// # Examples
/// ```
/// let xml = r#"<rss version="2.0"
///     xmlns:wp="http://wordpress.org/export/1.2/">
///   <channel>
///     <title>Blog</title>
///     <wp:base_site_url>http://example.com</wp:base_site_url>
///   </channel>
/// </rss>"#;
///
/// let result = wxr_parser::parse_str(xml).unwrap();
/// assert_eq!(result.blog.title.as_deref(), Some("Blog"));
/// assert!(result.posts.is_empty());
///
/// assert!(wxr_parser::parse_str("<rss/>").is_err());
/// ```
pub fn parse_str(xml: &str) -> Result<ParseResult> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    parse_document(&doc)
}

/// Run the extraction stages over an already parsed document.
///
/// Fails only if the root element has no `<channel>` child.
pub fn parse_document(doc: &Document<'_>) -> Result<ParseResult> {
    let channel = require_child(doc.root_element(), None, "channel")?;

    let blog = parse_blog(channel);
    let authors = parse_authors(channel);
    let categories = parse_categories(channel);
    let tags = parse_tags(channel);
    let posts = parse_posts(channel);

    tracing::debug!(
        authors = authors.len(),
        categories = categories.len(),
        tags = tags.len(),
        posts = posts.len(),
        "Parsed export"
    );

    Ok(ParseResult {
        blog,
        authors,
        categories,
        tags,
        posts,
    })
}
