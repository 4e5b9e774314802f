//! Account snapshot the commands discover from and replicate into

use crate::config::{AccountConfig, AppConfig};
use anyhow::{Context, Result};
use folder_mover_core::{AccountId, AccountSnapshot, InMemoryFolderService};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Folder service backed by a snapshot file
pub struct SnapshotBackend {
    path: PathBuf,
    account: AccountId,
    service: InMemoryFolderService,
}

impl SnapshotBackend {
    /// Load the snapshot named by the configuration
    pub async fn open(config: &AppConfig) -> Result<Self> {
        Self::open_path(&config.snapshot_path(), &config.account).await
    }

    /// Load a snapshot and check it against the account settings
    ///
    /// The configured account wins over the one recorded in the snapshot, so
    /// a mismatch surfaces as an access error on the first call. A configured
    /// region must match the snapshot's.
    pub async fn open_path(path: &Path, settings: &AccountConfig) -> Result<Self> {
        debug!("Loading account snapshot from {}", path.display());
        let snapshot = AccountSnapshot::load(path)
            .await
            .with_context(|| format!("Failed to load account snapshot {}", path.display()))?;

        if let Some(region) = settings.region.as_deref()
            && region != snapshot.region
        {
            anyhow::bail!(
                "Snapshot {} is for region {}, but account.region is {region}",
                path.display(),
                snapshot.region
            );
        }

        let account = match settings.account_id.as_deref() {
            Some(id) => AccountId::new(id).context("Invalid account.account_id")?,
            None => snapshot.account_id.clone(),
        };
        debug!(
            "Snapshot holds {} folder(s) and {} membership(s)",
            snapshot.folders.len(),
            snapshot.members.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            account,
            service: InMemoryFolderService::new(snapshot),
        })
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn service(&self) -> &InMemoryFolderService {
        &self.service
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current state back to the snapshot file
    pub async fn persist(&self) -> Result<()> {
        let snapshot = self.service.snapshot().await;
        snapshot
            .save(&self.path)
            .await
            .with_context(|| format!("Failed to save account snapshot {}", self.path.display()))?;
        info!("Saved account snapshot to {}", self.path.display());
        Ok(())
    }
}
