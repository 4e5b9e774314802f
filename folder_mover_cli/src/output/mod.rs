mod formatters;
mod summary;

pub use formatters::{JsonFormatter, TreeFormatter};
pub use summary::{format_filter_report, format_plan, format_report};

use anyhow::Result;
use folder_mover_core::FolderNode;

/// How a folder document is rendered on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// The document itself, 4-space indented JSON
    Json,
    /// Indented tree with content counts
    Tree,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn from_string(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "tree" | "text" => Ok(Self::Tree),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Trait for folder document formatters
pub trait OutputFormatter: Send + Sync {
    fn format_folders(&self, folders: &[FolderNode]) -> Result<String>;
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Tree => Box::new(TreeFormatter::new(use_color)),
    }
}
