//! Configuration constants and validation functions for the parser.

use crate::error::{Result, WxrError};

/// Namespace of the excerpt field (`excerpt:encoded`).
pub const EXCERPT_NAMESPACE: &str = "http://wordpress.org/export/1.2/excerpt/";

/// Namespace of the full post body (`content:encoded`).
pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";

/// Well-Formed Web comment API namespace. Declared by every export, never read.
pub const WFW_NAMESPACE: &str = "http://wellformedweb.org/CommentAPI/";

/// Dublin Core namespace (`dc:creator`).
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

/// WordPress export namespace, version 1.2.
pub const WP_NAMESPACE: &str = "http://wordpress.org/export/1.2/";

/// Default maximum input size in bytes (256 MB).
///
/// The whole document is held in memory while it is traversed. Can be
/// overridden via the CLI `--max-size` flag.
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 256 * 1024 * 1024;

/// Maximum depth of the category forest.
pub const MAX_CATEGORY_DEPTH: usize = 256;

/// Maximum nesting depth accepted by the PHP unserializer.
pub const MAX_DECODE_DEPTH: usize = 512;

/// Prefix for domain-grouped post terms (`category_post_tag`, ...).
pub const CATEGORY_DOMAIN_PREFIX: &str = "category_";

/// XML namespaces used by a WXR export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `excerpt:` prefix.
    Excerpt,
    /// `content:` prefix.
    Content,
    /// `wfw:` prefix.
    Wfw,
    /// `dc:` prefix.
    Dc,
    /// `wp:` prefix.
    Wp,
}

impl Namespace {
    /// All namespaces, in the order an export declares them.
    pub const ALL: [Namespace; 5] = [
        Self::Excerpt,
        Self::Content,
        Self::Wfw,
        Self::Dc,
        Self::Wp,
    ];

    /// Namespace URI.
    #[must_use]
    pub fn uri(&self) -> &'static str {
        match self {
            Self::Excerpt => EXCERPT_NAMESPACE,
            Self::Content => CONTENT_NAMESPACE,
            Self::Wfw => WFW_NAMESPACE,
            Self::Dc => DC_NAMESPACE,
            Self::Wp => WP_NAMESPACE,
        }
    }

    /// Conventional prefix used by WordPress when writing the export.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Excerpt => "excerpt",
            Self::Content => "content",
            Self::Wfw => "wfw",
            Self::Dc => "dc",
            Self::Wp => "wp",
        }
    }

    /// Look up a namespace by its URI.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.uri() == uri)
    }
}

/// Options controlling a parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject inputs larger than this many bytes. `None` disables the check.
    pub max_input_size: Option<u64>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_input_size: Some(DEFAULT_MAX_INPUT_SIZE),
        }
    }
}

impl ParseOptions {
    /// Options without an input size limit.
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_input_size: None,
        }
    }

    /// Set the maximum input size.
    #[must_use]
    pub fn with_max_input_size(mut self, max: u64) -> Self {
        self.max_input_size = Some(max);
        self
    }
}

/// Validate an input size against a limit.
///
/// # Examples
/// ```
/// use wxr_parser::config::validate_input_size;
///
/// assert!(validate_input_size(10, Some(100)).is_ok());
/// assert!(validate_input_size(1000, Some(100)).is_err());
/// assert!(validate_input_size(1000, None).is_ok());
/// ```
pub fn validate_input_size(size: u64, max: Option<u64>) -> Result<()> {
    match max {
        Some(max) if size > max => Err(WxrError::InputTooLarge { size, max }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_uri() {
        assert_eq!(Namespace::Wp.uri(), "http://wordpress.org/export/1.2/");
        assert_eq!(Namespace::Dc.uri(), "http://purl.org/dc/elements/1.1/");
        assert_eq!(
            Namespace::Excerpt.uri(),
            "http://wordpress.org/export/1.2/excerpt/"
        );
    }

    #[test]
    fn test_namespace_from_uri() {
        for ns in Namespace::ALL {
            assert_eq!(Namespace::from_uri(ns.uri()), Some(ns));
        }
        assert_eq!(Namespace::from_uri("http://wordpress.org/export/1.1/"), None);
    }

    #[test]
    fn test_namespace_prefix() {
        assert_eq!(Namespace::Wp.prefix(), "wp");
        assert_eq!(Namespace::Content.prefix(), "content");
    }

    #[test]
    fn test_validate_input_size() {
        assert!(validate_input_size(0, Some(0)).is_ok());
        assert!(validate_input_size(100, Some(100)).is_ok());
        assert!(matches!(
            validate_input_size(101, Some(100)),
            Err(WxrError::InputTooLarge { size: 101, max: 100 })
        ));
        assert!(validate_input_size(u64::MAX, None).is_ok());
    }

    #[test]
    fn test_parse_options_default() {
        let options = ParseOptions::default();
        assert_eq!(options.max_input_size, Some(DEFAULT_MAX_INPUT_SIZE));
        assert_eq!(ParseOptions::unlimited().max_input_size, None);
        assert_eq!(
            ParseOptions::unlimited().with_max_input_size(5).max_input_size,
            Some(5)
        );
    }
}
