//! Replicate command orchestrator
//!
//! Plans the replication, asks for confirmation, runs it against the account
//! snapshot and saves whatever was created, including after a failure.

use super::backend::SnapshotBackend;
use crate::output::{format_plan, format_report};
use crate::progress::{ProgressSession, format_elapsed};
use crate::terminal;
use anyhow::{Context, Result};
use colored::*;
use dialoguer::Confirm;
use folder_mover_core::{FolderNode, ReplicationReport, TreeReplicator};
use log::{debug, warn};
use std::time::Instant;

/// Replicate command options
#[derive(Debug, Clone)]
pub struct ReplicateOptions {
    pub destination_arn: String,
    pub folder_id_prefix: String,
    /// Print the plan and stop
    pub dry_run: bool,
    /// Skip the confirmation prompt
    pub assume_yes: bool,
    pub show_progress: bool,
    pub use_color: bool,
}

/// What the replicate command ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicateOutcome {
    DryRun,
    Declined,
    Nothing,
    Completed(ReplicationReport),
}

/// Orchestrator for the replicate command
pub struct ReplicateOrchestrator<'a> {
    backend: &'a SnapshotBackend,
    options: ReplicateOptions,
}

impl<'a> ReplicateOrchestrator<'a> {
    pub fn new(backend: &'a SnapshotBackend, options: ReplicateOptions) -> Self {
        debug!("Creating replicate orchestrator with options: {options:?}");
        Self { backend, options }
    }

    fn replicator<'s>(&'s self) -> TreeReplicator<'s> {
        TreeReplicator::new(self.backend.service(), self.backend.account())
            .with_id_prefix(self.options.folder_id_prefix.clone())
    }

    pub async fn replicate(&self, folders: &[FolderNode]) -> Result<ReplicateOutcome> {
        if folders.is_empty() {
            eprintln!("{}", "No folders to replicate".yellow());
            return Ok(ReplicateOutcome::Nothing);
        }

        let plan = self.replicator().plan(folders);
        eprint!(
            "{}",
            format_plan(&plan, &self.options.destination_arn, self.options.use_color)
        );

        if self.options.dry_run {
            eprintln!("{}", "DRY RUN MODE - No changes were made".yellow());
            return Ok(ReplicateOutcome::DryRun);
        }

        if plan.has_collisions() {
            anyhow::bail!(
                "Derived folder ids collide: {}. Rename the source folders or change replication.folder_id_prefix",
                plan.collisions.join(", ")
            );
        }

        if !self.confirm(plan.folders.len())? {
            eprintln!("Replication cancelled.");
            return Ok(ReplicateOutcome::Declined);
        }

        let start = Instant::now();
        let session = ProgressSession::start(self.options.show_progress);
        let mut report = ReplicationReport::default();
        let mut result = Ok(());
        {
            let replicator = self.replicator().with_progress(session.provider());
            for folder in folders {
                result = replicator
                    .replicate_into(folder, &self.options.destination_arn, &mut report)
                    .await;
                if result.is_err() {
                    break;
                }
            }
        }
        session.finish().await;

        // Nothing is rolled back, so a partial run is saved too
        if !report.folders.is_empty() {
            self.backend.persist().await?;
        }

        eprint!("{}", format_report(&report, self.options.use_color));
        match result {
            Ok(()) => {
                eprintln!(
                    "{} in {}",
                    "Replication complete".green().bold(),
                    format_elapsed(start.elapsed())
                );
                Ok(ReplicateOutcome::Completed(report))
            }
            Err(e) => {
                warn!(
                    "Replication stopped after {} folder(s); nothing was rolled back",
                    report.folders.len()
                );
                Err(e).context("Replication failed; folders listed above were already created")
            }
        }
    }

    fn confirm(&self, folder_count: usize) -> Result<bool> {
        if self.options.assume_yes {
            return Ok(true);
        }
        if !terminal::can_prompt() {
            anyhow::bail!("Refusing to replicate without confirmation; pass --yes");
        }

        Confirm::new()
            .with_prompt(format!(
                "Create {folder_count} folder(s) under {}?",
                self.options.destination_arn
            ))
            .default(false)
            .interact()
            .context("Failed to read input")
    }
}
