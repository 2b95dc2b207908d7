//! Error types for the parser.
//!
//! Uses the dual-error pattern: `WxrError` for library consumers with
//! detailed error context, and [`crate::php::DecodeError`] scoped to the
//! PHP unserializer so callers can decide how tolerant to be.

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum WxrError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Missing required XML element.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Input is larger than the configured limit.
    #[error("Input is {size} bytes, exceeding the limit of {max} bytes")]
    InputTooLarge { size: u64, max: u64 },

    /// Input is not valid UTF-8.
    #[error("Input is not valid UTF-8: {context}")]
    InvalidUtf8 { context: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, WxrError>;
