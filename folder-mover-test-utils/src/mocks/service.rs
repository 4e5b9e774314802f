//! Recording folder service for testing
//!
//! Wraps [`InMemoryFolderService`] so tests get realistic service behavior,
//! plus a log of every call in issue order and configurable failures.

use async_trait::async_trait;
use folder_mover_core::error::ServiceError;
use folder_mover_core::{
    AccountId, AccountSnapshot, ContentKind, CreatedFolder, FolderMember, FolderService,
    FolderSummary, InMemoryFolderService, Result,
};
use std::sync::{Arc, Mutex};

/// A call received by [`MockFolderService`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    ListFolders,
    SearchChildFolders {
        parent_arn: String,
    },
    ListFolderMembers {
        folder_id: String,
    },
    CreateFolder {
        name: String,
        folder_id: String,
        parent_arn: String,
    },
    CreateFolderMembership {
        folder_id: String,
        member_id: String,
        member_type: ContentKind,
    },
}

#[derive(Debug, Clone)]
enum FailureRule {
    Offline,
    CreateFolderNamed { name: String, error: ServiceError },
    ListMembersOf { folder_id: String, error: ServiceError },
}

/// Mock implementation of [`FolderService`] for testing
///
/// # Examples
///
/// ```rust,no_run
/// use folder_mover_test_utils::MockFolderService;
/// use folder_mover_core::{AccountId, FolderService};
///
/// # async fn example() -> folder_mover_core::Result<()> {
/// let account = AccountId::new("111122223333")?;
/// let mock = MockFolderService::empty(account.clone(), "us-east-1");
/// mock.go_offline();
///
/// assert!(mock.list_folders(&account).await.is_err());
/// assert_eq!(mock.calls().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MockFolderService {
    inner: InMemoryFolderService,
    calls: Arc<Mutex<Vec<ServiceCall>>>,
    failures: Arc<Mutex<Vec<FailureRule>>>,
}

impl MockFolderService {
    pub fn new(snapshot: AccountSnapshot) -> Self {
        Self {
            inner: InMemoryFolderService::new(snapshot),
            calls: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Service for an account with no folders
    pub fn empty(account: AccountId, region: &str) -> Self {
        Self::new(AccountSnapshot::new(account, region))
    }

    /// Fail every call with [`ServiceError::NetworkOffline`]
    pub fn go_offline(&self) {
        self.add_failure(FailureRule::Offline);
    }

    /// Fail `create_folder` for folders with this display name
    pub fn fail_create_folder_named(&self, name: &str, error: ServiceError) {
        self.add_failure(FailureRule::CreateFolderNamed {
            name: name.to_string(),
            error,
        });
    }

    /// Fail `list_folder_members` for this folder id
    pub fn fail_list_members(&self, folder_id: &str, error: ServiceError) {
        self.add_failure(FailureRule::ListMembersOf {
            folder_id: folder_id.to_string(),
            error,
        });
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Only the `create_folder` calls
    pub fn create_folder_calls(&self) -> Vec<ServiceCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, ServiceCall::CreateFolder { .. }))
            .collect()
    }

    /// Only the `create_folder_membership` calls
    pub fn membership_calls(&self) -> Vec<ServiceCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, ServiceCall::CreateFolderMembership { .. }))
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// The wrapped service, for seeding and inspecting state
    pub fn inner(&self) -> &InMemoryFolderService {
        &self.inner
    }

    fn add_failure(&self, rule: FailureRule) {
        self.failures.lock().unwrap().push(rule);
    }

    fn record(&self, call: ServiceCall) -> Result<()> {
        let failure = self
            .failures
            .lock()
            .unwrap()
            .iter()
            .find_map(|rule| match (rule, &call) {
                (FailureRule::Offline, _) => Some(ServiceError::NetworkOffline),
                (
                    FailureRule::CreateFolderNamed { name, error },
                    ServiceCall::CreateFolder { name: called, .. },
                ) if name == called => Some(error.clone()),
                (
                    FailureRule::ListMembersOf { folder_id, error },
                    ServiceCall::ListFolderMembers { folder_id: called },
                ) if folder_id == called => Some(error.clone()),
                _ => None,
            });

        self.calls.lock().unwrap().push(call);
        match failure {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl FolderService for MockFolderService {
    async fn list_folders(&self, account: &AccountId) -> Result<Vec<FolderSummary>> {
        self.record(ServiceCall::ListFolders)?;
        self.inner.list_folders(account).await
    }

    async fn search_child_folders(
        &self,
        account: &AccountId,
        parent_arn: &str,
    ) -> Result<Vec<FolderSummary>> {
        self.record(ServiceCall::SearchChildFolders {
            parent_arn: parent_arn.to_string(),
        })?;
        self.inner.search_child_folders(account, parent_arn).await
    }

    async fn list_folder_members(
        &self,
        account: &AccountId,
        folder_id: &str,
    ) -> Result<Vec<FolderMember>> {
        self.record(ServiceCall::ListFolderMembers {
            folder_id: folder_id.to_string(),
        })?;
        self.inner.list_folder_members(account, folder_id).await
    }

    async fn create_folder(
        &self,
        account: &AccountId,
        name: &str,
        folder_id: &str,
        parent_arn: &str,
    ) -> Result<CreatedFolder> {
        self.record(ServiceCall::CreateFolder {
            name: name.to_string(),
            folder_id: folder_id.to_string(),
            parent_arn: parent_arn.to_string(),
        })?;
        self.inner
            .create_folder(account, name, folder_id, parent_arn)
            .await
    }

    async fn create_folder_membership(
        &self,
        account: &AccountId,
        folder_id: &str,
        member_id: &str,
        member_type: ContentKind,
    ) -> Result<()> {
        self.record(ServiceCall::CreateFolderMembership {
            folder_id: folder_id.to_string(),
            member_id: member_id.to_string(),
            member_type,
        })?;
        self.inner
            .create_folder_membership(account, folder_id, member_id, member_type)
            .await
    }
}
