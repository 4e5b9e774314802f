//! Remote folder service abstraction
//!
//! The traversal components only talk to the service through this trait, so
//! the transport (SDK client, offline snapshot, test double) is chosen by the
//! caller and lives exactly as long as one discovery or replication run.

use crate::error::{Result, ValidationError};
use crate::model::{ContentKind, CreatedFolder, FolderMember, FolderSummary};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account scope every service call is issued against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account id, rejecting blank input
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::invalid_parameter("account_id", "must not be empty").into());
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operations consumed from the remote folder/content service
///
/// Implementations return complete result sets; paging, authentication and
/// retries are their own business.
#[async_trait]
pub trait FolderService: Send + Sync {
    /// List every folder in the account, without any filter
    async fn list_folders(&self, account: &AccountId) -> Result<Vec<FolderSummary>>;

    /// Folders whose parent ARN equals `parent_arn` exactly
    async fn search_child_folders(
        &self,
        account: &AccountId,
        parent_arn: &str,
    ) -> Result<Vec<FolderSummary>>;

    /// Memberships of a folder
    async fn list_folder_members(
        &self,
        account: &AccountId,
        folder_id: &str,
    ) -> Result<Vec<FolderMember>>;

    /// Create a folder under `parent_arn` with the caller-chosen `folder_id`
    async fn create_folder(
        &self,
        account: &AccountId,
        name: &str,
        folder_id: &str,
        parent_arn: &str,
    ) -> Result<CreatedFolder>;

    /// Attach a content item to a folder
    async fn create_folder_membership(
        &self,
        account: &AccountId,
        folder_id: &str,
        member_id: &str,
        member_type: ContentKind,
    ) -> Result<()>;
}
