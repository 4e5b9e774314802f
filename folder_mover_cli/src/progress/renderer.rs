//! Progress rendering for the CLI

use colored::*;
use folder_mover_core::ProgressUpdate;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::mpsc;

/// Render progress updates from a channel until it closes
pub async fn render_progress(mut rx: mpsc::Receiver<ProgressUpdate>) {
    let mut renderer = ProgressRenderer::new();

    while let Some(update) = rx.recv().await {
        renderer.handle_update(update);
    }

    renderer.finish();
}

/// Single spinner summarizing discovery and replication activity
pub struct ProgressRenderer {
    spinner: ProgressBar,
    folders_discovered: usize,
    folders_created: usize,
    memberships_created: usize,
}

impl ProgressRenderer {
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner:.cyan} [{elapsed}] {msg}")
        {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));

        Self {
            spinner,
            folders_discovered: 0,
            folders_created: 0,
            memberships_created: 0,
        }
    }

    pub fn handle_update(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::FolderDiscovered { name, depth, .. } => {
                self.folders_discovered += 1;
                self.spinner.set_message(format!(
                    "{} {} folder(s) | {}{}",
                    "Discovering".bold(),
                    self.folders_discovered,
                    "  ".repeat(depth.min(8)),
                    name.cyan()
                ));
            }
            ProgressUpdate::FolderCreated { new_folder_id, .. } => {
                self.folders_created += 1;
                self.spinner.set_message(self.replication_message(&new_folder_id));
            }
            ProgressUpdate::MembershipCreated { folder_id, .. } => {
                self.memberships_created += 1;
                self.spinner.set_message(self.replication_message(&folder_id));
            }
            ProgressUpdate::Status { message } => {
                self.spinner.set_message(message);
            }
        }
    }

    fn replication_message(&self, folder_id: &str) -> String {
        format!(
            "{} {} folder(s), {} membership(s) | {}",
            "Replicating".bold(),
            self.folders_created,
            self.memberships_created,
            folder_id.cyan()
        )
    }

    pub fn finish(self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for ProgressRenderer {
    fn default() -> Self {
        Self::new()
    }
}
