//! In-memory folder service backed by an account snapshot
//!
//! Behaves like the remote service for everything the traversals rely on:
//! exact parent matching, caller-chosen folder ids, id collisions and unknown
//! parents rejected. The snapshot round-trips through JSON, which lets the
//! CLI work against an exported account offline.

use crate::document;
use crate::error::{Result, ServiceError, ValidationError};
use crate::model::{ContentKind, CreatedFolder, FolderMember, FolderSummary};
use crate::service::{AccountId, FolderService};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::sync::RwLock;

/// Folder record as stored in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotFolder {
    pub arn: String,
    pub folder_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_arn: Option<String>,
}

impl SnapshotFolder {
    fn summary(&self) -> FolderSummary {
        FolderSummary::new(&self.arn, &self.folder_id, &self.name)
    }
}

/// Membership record as stored in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnapshotMember {
    pub folder_id: String,
    pub member_arn: String,
    pub member_id: String,
}

/// Folders and memberships of one account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountSnapshot {
    pub account_id: AccountId,
    pub region: String,
    #[serde(default)]
    pub folders: Vec<SnapshotFolder>,
    #[serde(default)]
    pub members: Vec<SnapshotMember>,
}

impl AccountSnapshot {
    pub fn new(account_id: AccountId, region: impl Into<String>) -> Self {
        Self {
            account_id,
            region: region.into(),
            folders: Vec::new(),
            members: Vec::new(),
        }
    }

    /// ARN the service assigns to a folder id in this account
    pub fn folder_arn(&self, folder_id: &str) -> String {
        format!(
            "arn:aws:quicksight:{}:{}:folder/{folder_id}",
            self.region, self.account_id
        )
    }

    /// ARN of a content item of the given kind in this account
    pub fn member_arn(&self, kind: ContentKind, member_id: &str) -> String {
        format!(
            "arn:aws:quicksight:{}:{}:{}/{member_id}",
            self.region,
            self.account_id,
            kind.marker()
        )
    }

    /// Add a folder without any checks; returns its ARN
    pub fn add_folder(&mut self, folder_id: &str, name: &str, parent_arn: Option<&str>) -> String {
        let arn = self.folder_arn(folder_id);
        self.folders.push(SnapshotFolder {
            arn: arn.clone(),
            folder_id: folder_id.to_string(),
            name: name.to_string(),
            parent_folder_arn: parent_arn.map(str::to_string),
        });
        arn
    }

    /// Add a membership without any checks
    pub fn add_member(&mut self, folder_id: &str, kind: ContentKind, member_id: &str) {
        let member_arn = self.member_arn(kind, member_id);
        self.members.push(SnapshotMember {
            folder_id: folder_id.to_string(),
            member_arn,
            member_id: member_id.to_string(),
        });
    }

    pub fn folder(&self, folder_id: &str) -> Option<&SnapshotFolder> {
        self.folders.iter().find(|f| f.folder_id == folder_id)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        document::read_json(path).await
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        document::write_json(path, self).await
    }
}

/// [`FolderService`] over an [`AccountSnapshot`]
pub struct InMemoryFolderService {
    state: RwLock<AccountSnapshot>,
}

impl InMemoryFolderService {
    pub fn new(snapshot: AccountSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> AccountSnapshot {
        self.state.read().await.clone()
    }

    /// Listing entry for a folder id, if present
    pub async fn summary_of(&self, folder_id: &str) -> Option<FolderSummary> {
        self.state
            .read()
            .await
            .folder(folder_id)
            .map(SnapshotFolder::summary)
    }

    /// Attach a content item, with the same checks as a remote membership call
    pub async fn seed_member(&self, folder_id: &str, kind: ContentKind, member_id: &str) -> Result<()> {
        let account = self.state.read().await.account_id.clone();
        self.create_folder_membership(&account, folder_id, member_id, kind)
            .await
    }

    fn check_account(state: &AccountSnapshot, account: &AccountId) -> Result<()> {
        if &state.account_id != account {
            return Err(ServiceError::access_denied(format!(
                "account {account} is not accessible with these credentials"
            ))
            .into());
        }
        Ok(())
    }
}

#[async_trait]
impl FolderService for InMemoryFolderService {
    async fn list_folders(&self, account: &AccountId) -> Result<Vec<FolderSummary>> {
        let state = self.state.read().await;
        Self::check_account(&state, account)?;
        Ok(state.folders.iter().map(SnapshotFolder::summary).collect())
    }

    async fn search_child_folders(
        &self,
        account: &AccountId,
        parent_arn: &str,
    ) -> Result<Vec<FolderSummary>> {
        let state = self.state.read().await;
        Self::check_account(&state, account)?;
        Ok(state
            .folders
            .iter()
            .filter(|f| f.parent_folder_arn.as_deref() == Some(parent_arn))
            .map(SnapshotFolder::summary)
            .collect())
    }

    async fn list_folder_members(
        &self,
        account: &AccountId,
        folder_id: &str,
    ) -> Result<Vec<FolderMember>> {
        let state = self.state.read().await;
        Self::check_account(&state, account)?;
        if state.folder(folder_id).is_none() {
            return Err(ServiceError::not_found("folder", folder_id).into());
        }
        Ok(state
            .members
            .iter()
            .filter(|m| m.folder_id == folder_id)
            .map(|m| FolderMember::new(&m.member_arn, &m.member_id))
            .collect())
    }

    async fn create_folder(
        &self,
        account: &AccountId,
        name: &str,
        folder_id: &str,
        parent_arn: &str,
    ) -> Result<CreatedFolder> {
        let mut state = self.state.write().await;
        Self::check_account(&state, account)?;

        if folder_id.is_empty() {
            return Err(ValidationError::invalid_parameter("folder_id", "must not be empty").into());
        }
        if state.folder(folder_id).is_some() {
            return Err(ServiceError::conflict("folder", folder_id).into());
        }
        if !state.folders.iter().any(|f| f.arn == parent_arn) {
            return Err(ServiceError::not_found("parent folder", parent_arn).into());
        }

        let arn = state.add_folder(folder_id, name, Some(parent_arn));
        debug!("Created folder {folder_id} ({arn}) under {parent_arn}");
        Ok(CreatedFolder {
            arn,
            folder_id: folder_id.to_string(),
        })
    }

    async fn create_folder_membership(
        &self,
        account: &AccountId,
        folder_id: &str,
        member_id: &str,
        member_type: ContentKind,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        Self::check_account(&state, account)?;

        if state.folder(folder_id).is_none() {
            return Err(ServiceError::not_found("folder", folder_id).into());
        }
        let member_arn = state.member_arn(member_type, member_id);
        if state
            .members
            .iter()
            .any(|m| m.folder_id == folder_id && m.member_arn == member_arn)
        {
            return Err(ServiceError::conflict("folder membership", member_id).into());
        }

        state.add_member(folder_id, member_type, member_id);
        debug!("Added {member_type} {member_id} to folder {folder_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn account() -> AccountId {
        AccountId::new("111122223333").unwrap()
    }

    fn service() -> InMemoryFolderService {
        let mut snapshot = AccountSnapshot::new(account(), "us-east-1");
        let root = snapshot.add_folder("root", "Root", None);
        snapshot.add_folder("child", "Child", Some(&root));
        snapshot.add_member("child", ContentKind::Analysis, "an-1");
        InMemoryFolderService::new(snapshot)
    }

    #[test]
    fn test_arn_layout() {
        let snapshot = AccountSnapshot::new(account(), "us-east-1");
        assert_eq!(
            snapshot.folder_arn("F1"),
            "arn:aws:quicksight:us-east-1:111122223333:folder/F1"
        );
        assert_eq!(
            snapshot.member_arn(ContentKind::Dataset, "ds"),
            "arn:aws:quicksight:us-east-1:111122223333:dataset/ds"
        );
    }

    #[tokio::test]
    async fn test_search_matches_parent_exactly() {
        let service = service();
        let account = account();
        let root_arn = "arn:aws:quicksight:us-east-1:111122223333:folder/root";

        let children = service.search_child_folders(&account, root_arn).await.unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].folder_id, "child");

        let upper = root_arn.to_uppercase();
        let none = service.search_child_folders(&account, &upper).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_create_folder_rejects_duplicate_id() {
        let service = service();
        let account = account();
        let root_arn = "arn:aws:quicksight:us-east-1:111122223333:folder/root";

        let result = service.create_folder(&account, "Again", "child", root_arn).await;
        assert!(matches!(
            result,
            Err(Error::Service(ServiceError::Conflict { .. }))
        ));
    }

    #[tokio::test]
    async fn test_create_folder_requires_known_parent() {
        let service = service();
        let result = service
            .create_folder(&account(), "Orphan", "orphan", "arn:missing")
            .await;
        assert!(matches!(
            result,
            Err(Error::Service(ServiceError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_other_account_is_denied() {
        let service = service();
        let other = AccountId::new("999999999999").unwrap();
        let result = service.list_folders(&other).await;
        assert!(matches!(
            result,
            Err(Error::Service(ServiceError::AccessDenied { .. }))
        ));
    }

    #[tokio::test]
    async fn test_membership_round_trip() {
        let service = service();
        let account = account();

        service
            .create_folder_membership(&account, "root", "dash-9", ContentKind::Dashboard)
            .await
            .unwrap();
        let members = service.list_folder_members(&account, "root").await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].kind(), Some(ContentKind::Dashboard));

        let duplicate = service
            .create_folder_membership(&account, "root", "dash-9", ContentKind::Dashboard)
            .await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_members_of_unknown_folder() {
        let service = service();
        let result = service.list_folder_members(&account(), "nope").await;
        assert!(matches!(
            result,
            Err(Error::Service(ServiceError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_snapshot_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account.json");

        let original = service().snapshot().await;
        original.save(&path).await.unwrap();
        let loaded = AccountSnapshot::load(&path).await.unwrap();

        assert_eq!(loaded, original);
    }
}
