//! Folder inventory queries
//!
//! Thin, read-only wrapper over the listing calls of a [`FolderService`].
//! Failures from the service are returned as-is.

use crate::error::Result;
use crate::model::{ContentKind, ContentRef, FolderContents, FolderSummary};
use crate::service::{AccountId, FolderService};
use log::debug;

/// Enumerates folders and folder content for one account
pub struct FolderCatalog<'a> {
    service: &'a dyn FolderService,
    account: &'a AccountId,
}

impl<'a> FolderCatalog<'a> {
    pub fn new(service: &'a dyn FolderService, account: &'a AccountId) -> Self {
        Self { service, account }
    }

    pub fn account(&self) -> &AccountId {
        self.account
    }

    /// Every folder the account knows about
    pub async fn list_top_level_folders(&self) -> Result<Vec<FolderSummary>> {
        debug!("Listing folders for account {}", self.account);
        let folders = self.service.list_folders(self.account).await?;
        debug!("Account {} has {} folder(s)", self.account, folders.len());
        Ok(folders)
    }

    /// Folders whose parent ARN equals `parent_arn` (exact, case-sensitive)
    pub async fn list_child_folders(&self, parent_arn: &str) -> Result<Vec<FolderSummary>> {
        debug!("Searching child folders of {parent_arn}");
        let children = self
            .service
            .search_child_folders(self.account, parent_arn)
            .await?;
        debug!("{parent_arn} has {} child folder(s)", children.len());
        Ok(children)
    }

    /// Content of one kind held by a folder
    pub async fn list_content(&self, folder_id: &str, kind: ContentKind) -> Result<Vec<ContentRef>> {
        let contents = self.list_folder_contents(folder_id).await?;
        Ok(match kind {
            ContentKind::Analysis => contents.analyses,
            ContentKind::Dashboard => contents.dashboards,
            ContentKind::Dataset => contents.datasets,
        })
    }

    /// All content of a folder, partitioned by kind from a single listing
    pub async fn list_folder_contents(&self, folder_id: &str) -> Result<FolderContents> {
        debug!("Listing members of folder {folder_id}");
        let members = self
            .service
            .list_folder_members(self.account, folder_id)
            .await?;
        let contents = FolderContents::from_members(members);
        debug!(
            "Folder {folder_id}: {} analyses, {} dashboards, {} datasets",
            contents.analyses.len(),
            contents.dashboards.len(),
            contents.datasets.len()
        );
        Ok(contents)
    }
}
