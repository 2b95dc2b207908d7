//! Command-line interface for the parser.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;

use crate::config::{ParseOptions, DEFAULT_MAX_INPUT_SIZE};
use crate::error::Result;
use crate::output::{render, save, OutputFormat};
use crate::parser::parse_file_with;

/// WXR parser - Convert WordPress export files into structured data.
#[derive(Parser)]
#[command(name = "wxr-parser")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse an export file and print it as JSON or YAML.
    Parse {
        /// Path to the WXR export file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum input size in bytes
        #[arg(long, default_value_t = DEFAULT_MAX_INPUT_SIZE)]
        max_size: u64,
    },

    /// Print an overview of an export file.
    Summary {
        /// Path to the WXR export file
        file: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            file,
            format,
            output,
            max_size,
        } => parse_command(&file, format, output.as_deref(), max_size),
        Commands::Summary { file } => summary_command(&file),
    }
}

/// Execute the parse command.
fn parse_command(
    file: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    max_size: u64,
) -> Result<()> {
    let options = ParseOptions::default().with_max_input_size(max_size);
    let result = parse_file_with(file, &options)?;

    match output {
        Some(path) => {
            save(&result, format, path)?;
            eprintln!(
                "{} {}",
                style("Saved to:").green().bold(),
                path.display()
            );
        }
        None => {
            let content = render(&result, format)?;
            std::io::stdout().lock().write_all(content.as_bytes())?;
        }
    }

    Ok(())
}

/// Execute the summary command.
fn summary_command(file: &Path) -> Result<()> {
    let result = parse_file_with(file, &ParseOptions::default())?;
    let blog = &result.blog;

    println!(
        "{} {}",
        style("Blog:").bold(),
        style(blog.title.as_deref().unwrap_or("(untitled)")).cyan()
    );
    if let Some(url) = &blog.site_url {
        println!("  URL: {}", style(url).green());
    }
    if let Some(language) = &blog.language {
        println!("  Language: {language}");
    }
    println!();
    println!("  Authors: {}", result.authors.len());
    println!(
        "  Categories: {} ({} top-level)",
        result.category_count(),
        result.categories.len()
    );
    println!("  Tags: {}", result.tags.len());
    println!("  Posts: {}", result.posts.len());
    println!("  Comments: {}", result.comment_count());

    let broken = result
        .posts
        .iter()
        .filter(|p| {
            p.post_type.as_deref() == Some("attachment")
                && p.postmeta.attached_file().is_some()
                && p.postmeta.attachment_metadata().is_none()
        })
        .count();
    if broken > 0 {
        println!(
            "  Attachments without metadata: {}",
            style(broken).yellow().bold()
        );
    }

    Ok(())
}
