//! Rendering of parse results as JSON or YAML.

mod writer;

pub use writer::{render, save, OutputFormat};
