//! Discovery pipeline: list, expand, normalize

use crate::builder::TreeBuilder;
use crate::catalog::FolderCatalog;
use crate::error::Result;
use crate::model::FolderNode;
use crate::normalize::TreeNormalizer;
use crate::progress::{NullProvider, ProgressProvider, ProgressUpdate};
use crate::service::{AccountId, FolderService};
use log::info;

/// Runs the full discovery for one account
pub struct Discovery<'a> {
    service: &'a dyn FolderService,
    account: &'a AccountId,
    progress: &'a dyn ProgressProvider,
}

impl<'a> Discovery<'a> {
    pub fn new(service: &'a dyn FolderService, account: &'a AccountId) -> Self {
        Self {
            service,
            account,
            progress: &NullProvider,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressProvider) -> Self {
        self.progress = progress;
        self
    }

    /// Every root folder of the account as a fully populated tree
    pub async fn run(&self) -> Result<Vec<FolderNode>> {
        let catalog = FolderCatalog::new(self.service, self.account);

        self.progress.report(ProgressUpdate::Status {
            message: format!("Listing folders of account {}", self.account),
        });
        let listed = catalog.list_top_level_folders().await?;
        let listed_count = listed.len();

        let trees = TreeBuilder::new(&catalog)
            .with_progress(self.progress)
            .build_all(listed)
            .await?;
        let roots = TreeNormalizer::new().normalize(trees);

        info!(
            "Discovered {} root folder(s) out of {listed_count} listed in account {}",
            roots.len(),
            self.account
        );
        self.progress.complete();
        Ok(roots)
    }
}
