//! WXR Parser - Convert WordPress eXtended RSS export files into structured data.
//!
//! This crate reads the XML file produced by WordPress' "Tools → Export" and
//! returns its blog metadata, authors, category tree, tags and posts
//! (including post metadata and comments) as plain Rust values that
//! serialize to JSON or YAML.
//!
//! # Example
//!
//! ```
//! let xml = r#"<rss version="2.0" xmlns:wp="http://wordpress.org/export/1.2/">
//!   <channel>
//!     <title>Blog</title>
//!     <item>
//!       <title>Hello world</title>
//!       <wp:post_type>post</wp:post_type>
//!     </item>
//!   </channel>
//! </rss>"#;
//!
//! let result = wxr_parser::parse_str(xml).unwrap();
//! assert_eq!(result.posts.len(), 1);
//! assert_eq!(result.posts[0].post_type.as_deref(), Some("post"));
//! ```
//!
//! # Architecture
//!
//! The parser is organized into several modules:
//!
//! - [`config`]: Namespace table, limits and validation
//! - [`types`]: Core data types (ParseResult, PostRecord, CategoryNode, etc.)
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Namespaced element lookup and text access
//! - [`php`]: Decoder for PHP-serialized metadata values
//! - [`extract`]: Extraction stages for blog, authors, taxonomy and posts
//! - [`parser`]: Entry points tying the stages together
//! - [`output`]: JSON and YAML rendering
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod parser;
pub mod php;
pub mod types;
pub mod xml;

// Re-export main functions
pub use parser::{parse_document, parse_file, parse_file_with, parse_str};

// Re-export commonly used items
pub use config::{Namespace, ParseOptions};
pub use error::{Result, WxrError};
pub use types::{
    AuthorRecord, BlogInfo, CategoryNode, CommentRecord, MetaValue, ParseResult, PostMeta,
    PostRecord, TagRecord, TermGroups, TermRef,
};
