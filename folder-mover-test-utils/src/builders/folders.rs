//! Builders for folder trees and seeded accounts

use folder_mover_core::{
    AccountId, AccountSnapshot, ContentKind, ContentRef, FolderNode, FolderSummary,
};

/// Account id used by fixtures unless told otherwise
pub const TEST_ACCOUNT_ID: &str = "111122223333";

/// Region used by fixtures unless told otherwise
pub const TEST_REGION: &str = "us-east-1";

pub fn test_account() -> AccountId {
    AccountId::new(TEST_ACCOUNT_ID).unwrap()
}

/// Fluent builder for an in-memory [`FolderNode`] tree
#[derive(Debug, Clone)]
pub struct FolderTreeBuilder {
    node: FolderNode,
}

impl FolderTreeBuilder {
    /// Folder with ARN `arn:<id>` and the given name
    pub fn new(folder_id: &str, name: &str) -> Self {
        Self {
            node: FolderNode::new(FolderSummary::new(format!("arn:{folder_id}"), folder_id, name)),
        }
    }

    pub fn with_arn(mut self, arn: &str) -> Self {
        self.node.arn = arn.to_string();
        self
    }

    pub fn with_analysis(mut self, member_id: &str) -> Self {
        self.node.analyses.push(ContentRef::new(member_id));
        self
    }

    pub fn with_dashboard(mut self, member_id: &str) -> Self {
        self.node.dashboards.push(ContentRef::new(member_id));
        self
    }

    pub fn with_dataset(mut self, member_id: &str) -> Self {
        self.node.datasets.push(ContentRef::new(member_id));
        self
    }

    pub fn with_subfolder(mut self, child: FolderTreeBuilder) -> Self {
        self.node.subfolders.push(child.build());
        self
    }

    pub fn build(self) -> FolderNode {
        self.node
    }
}

/// Builder for an [`AccountSnapshot`] with nested folders and content
///
/// Folders refer to their parent by folder id; ARNs are assigned the way the
/// service would assign them.
pub struct AccountBuilder {
    snapshot: AccountSnapshot,
}

impl Default for AccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountBuilder {
    pub fn new() -> Self {
        Self {
            snapshot: AccountSnapshot::new(test_account(), TEST_REGION),
        }
    }

    /// Top-level folder
    pub fn folder(mut self, folder_id: &str, name: &str) -> Self {
        self.snapshot.add_folder(folder_id, name, None);
        self
    }

    /// Folder nested under `parent_id`
    pub fn subfolder(mut self, parent_id: &str, folder_id: &str, name: &str) -> Self {
        let parent_arn = self.snapshot.folder_arn(parent_id);
        self.snapshot.add_folder(folder_id, name, Some(&parent_arn));
        self
    }

    pub fn member(mut self, folder_id: &str, kind: ContentKind, member_id: &str) -> Self {
        self.snapshot.add_member(folder_id, kind, member_id);
        self
    }

    /// Member whose ARN is not one of the replicated kinds
    pub fn foreign_member(mut self, folder_id: &str, resource_type: &str, member_id: &str) -> Self {
        let member_arn = format!(
            "arn:aws:quicksight:{}:{}:{resource_type}/{member_id}",
            self.snapshot.region, self.snapshot.account_id
        );
        self.snapshot
            .members
            .push(folder_mover_core::memory::SnapshotMember {
                folder_id: folder_id.to_string(),
                member_arn,
                member_id: member_id.to_string(),
            });
        self
    }

    pub fn build(self) -> AccountSnapshot {
        self.snapshot
    }
}
