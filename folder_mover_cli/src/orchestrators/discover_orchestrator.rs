//! Discover command orchestrator
//!
//! Runs the discovery pipeline against the account and writes the folder
//! document to a file or stdout.

use super::backend::SnapshotBackend;
use crate::output::{OutputFormat, create_formatter};
use crate::progress::{ProgressSession, format_elapsed};
use anyhow::{Context, Result};
use colored::*;
use folder_mover_core::{Discovery, FolderNode, document};
use log::debug;
use std::path::PathBuf;
use std::time::Instant;

/// Discover command options
#[derive(Debug, Clone)]
pub struct DiscoverOptions {
    /// Document destination; stdout when `None`
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub show_progress: bool,
    pub use_color: bool,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            output: None,
            format: OutputFormat::Json,
            show_progress: false,
            use_color: false,
        }
    }
}

/// Orchestrator for the discover command
pub struct DiscoverOrchestrator<'a> {
    backend: &'a SnapshotBackend,
    options: DiscoverOptions,
}

impl<'a> DiscoverOrchestrator<'a> {
    pub fn new(backend: &'a SnapshotBackend, options: DiscoverOptions) -> Self {
        Self { backend, options }
    }

    /// Discover the root folders of the account
    pub async fn discover(&self) -> Result<Vec<FolderNode>> {
        let start = Instant::now();
        let session = ProgressSession::start(self.options.show_progress);

        let result = Discovery::new(self.backend.service(), self.backend.account())
            .with_progress(session.provider())
            .run()
            .await;
        session.finish().await;

        let roots = result.with_context(|| {
            format!("Failed to discover folders of account {}", self.backend.account())
        })?;
        debug!("Discovery finished in {}", format_elapsed(start.elapsed()));
        Ok(roots)
    }

    /// Discover, then emit the document
    pub async fn run(&self) -> Result<Vec<FolderNode>> {
        let roots = self.discover().await?;
        self.emit(&roots).await?;
        Ok(roots)
    }

    /// Write `roots` where the options say
    pub async fn emit(&self, roots: &[FolderNode]) -> Result<()> {
        match &self.options.output {
            Some(path) => {
                document::write_document(path, roots)
                    .await
                    .with_context(|| format!("Failed to write document {}", path.display()))?;
                if self.options.format == OutputFormat::Tree {
                    print!("{}", create_formatter(OutputFormat::Tree, self.options.use_color).format_folders(roots)?);
                }
                let total: usize = roots.iter().map(FolderNode::folder_count).sum();
                eprintln!(
                    "{} {} root folder(s), {total} folder(s) to {}",
                    "Wrote".green(),
                    roots.len(),
                    path.display()
                );
            }
            None => {
                let formatter = create_formatter(self.options.format, self.options.use_color);
                print!("{}", formatter.format_folders(roots)?);
            }
        }
        Ok(())
    }
}
