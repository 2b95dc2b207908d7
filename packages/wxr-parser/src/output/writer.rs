//! Serialized output of a [`ParseResult`].

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use clap::ValueEnum;

use crate::error::Result;
use crate::types::ParseResult;

/// Serialization format for a parse result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML document.
    Yaml,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// Render a parse result.
///
/// Absent fields are written as `null`. Output always ends with a newline.
pub fn render(result: &ParseResult, format: OutputFormat) -> Result<String> {
    let content = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(result)?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(result)?;
            let lines: Vec<&str> = yaml.lines().map(str::trim_end).collect();
            format!("---\n{}\n", lines.join("\n"))
        }
    };
    Ok(content)
}

/// Save a rendered parse result to `path`.
///
/// Uses atomic write pattern: writes to a temp file next to the target,
/// syncs to disk, then renames.
pub fn save(result: &ParseResult, format: OutputFormat, path: &Path) -> Result<()> {
    let content = render(result, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("output.{}", format.extension()));
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;

    Ok(())
}
