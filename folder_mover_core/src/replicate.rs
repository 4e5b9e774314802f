//! Recreation of folder trees under a new parent
//!
//! Only structure travels: names, content references and nesting. Every
//! folder gets a fresh id derived from its name and a fresh ARN from the
//! service. Work is a strict pre-order walk: a folder is created, all of its
//! content is attached (analyses, dashboards, datasets), then its subfolders
//! follow in order. A failing call stops the walk; whatever was created so
//! far stays in place.

use crate::error::Result;
use crate::model::{ContentKind, FolderNode};
use crate::progress::{NullProvider, ProgressProvider, ProgressUpdate};
use crate::service::{AccountId, FolderService};
use log::{debug, info, warn};
use std::collections::HashMap;

/// Prefix placed in front of every derived folder id
pub const DEFAULT_FOLDER_ID_PREFIX: &str = "DestinationFolder";

/// Derive a folder id from a display name.
///
/// Spaces and square brackets are dropped. Names that differ only in those
/// characters map to the same id; the service rejects the second one.
pub fn derive_folder_id(prefix: &str, name: &str) -> String {
    let mut id = String::with_capacity(prefix.len() + name.len());
    id.push_str(prefix);
    id.extend(name.chars().filter(|c| !matches!(c, ' ' | '[' | ']')));
    id
}

/// One folder creation a replication would perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFolder {
    pub depth: usize,
    pub source_folder_id: String,
    pub name: String,
    pub folder_id: String,
    pub member_count: usize,
}

/// Calls a replication would issue, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicationPlan {
    pub folders: Vec<PlannedFolder>,
    pub membership_count: usize,
    /// Derived ids produced by more than one folder, in first-seen order
    pub collisions: Vec<String>,
}

impl ReplicationPlan {
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}

/// Folder created by a replication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicatedFolder {
    pub source_folder_id: String,
    pub name: String,
    pub folder_id: String,
    pub arn: String,
}

/// What a replication created; partial when the run failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicationReport {
    pub folders: Vec<ReplicatedFolder>,
    pub memberships_created: usize,
}

/// Recreates folder trees through a [`FolderService`]
pub struct TreeReplicator<'a> {
    service: &'a dyn FolderService,
    account: &'a AccountId,
    id_prefix: String,
    progress: &'a dyn ProgressProvider,
}

impl<'a> TreeReplicator<'a> {
    pub fn new(service: &'a dyn FolderService, account: &'a AccountId) -> Self {
        Self {
            service,
            account,
            id_prefix: DEFAULT_FOLDER_ID_PREFIX.to_string(),
            progress: &NullProvider,
        }
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressProvider) -> Self {
        self.progress = progress;
        self
    }

    /// Describe the creations replicating `folders` would perform
    pub fn plan(&self, folders: &[FolderNode]) -> ReplicationPlan {
        let mut plan = ReplicationPlan::default();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (depth, node) in folders.iter().flat_map(FolderNode::iter) {
            let folder_id = derive_folder_id(&self.id_prefix, &node.name);
            let count = seen.entry(folder_id.clone()).or_default();
            *count += 1;
            if *count == 2 {
                plan.collisions.push(folder_id.clone());
            }

            plan.membership_count += node.member_count();
            plan.folders.push(PlannedFolder {
                depth,
                source_folder_id: node.folder_id.clone(),
                name: node.name.clone(),
                folder_id,
                member_count: node.member_count(),
            });
        }

        for id in &plan.collisions {
            warn!("Derived folder id {id} is produced by more than one folder");
        }
        plan
    }

    /// Replicate several trees under the same destination, in order
    pub async fn replicate_all(
        &self,
        folders: &[FolderNode],
        destination_arn: &str,
    ) -> Result<ReplicationReport> {
        let mut report = ReplicationReport::default();
        for folder in folders {
            self.replicate_into(folder, destination_arn, &mut report)
                .await?;
        }
        Ok(report)
    }

    /// Replicate one tree under `destination_arn`
    pub async fn replicate(
        &self,
        folder: &FolderNode,
        destination_arn: &str,
    ) -> Result<ReplicationReport> {
        let mut report = ReplicationReport::default();
        self.replicate_into(folder, destination_arn, &mut report)
            .await?;
        Ok(report)
    }

    /// Replicate one tree, recording progress in `report` as it goes.
    ///
    /// On error `report` still describes everything created before the
    /// failure.
    pub async fn replicate_into(
        &self,
        folder: &FolderNode,
        destination_arn: &str,
        report: &mut ReplicationReport,
    ) -> Result<()> {
        let mut worklist: Vec<(&FolderNode, String)> = vec![(folder, destination_arn.to_string())];

        while let Some((node, parent_arn)) = worklist.pop() {
            let folder_id = derive_folder_id(&self.id_prefix, &node.name);
            debug!("Creating folder {folder_id} ({}) under {parent_arn}", node.name);
            let created = self
                .service
                .create_folder(self.account, &node.name, &folder_id, &parent_arn)
                .await?;
            info!(
                "Created folder {} for {} ({})",
                created.folder_id, node.folder_id, node.name
            );

            self.progress.report(ProgressUpdate::FolderCreated {
                source_folder_id: node.folder_id.clone(),
                new_folder_id: created.folder_id.clone(),
                name: node.name.clone(),
            });
            report.folders.push(ReplicatedFolder {
                source_folder_id: node.folder_id.clone(),
                name: node.name.clone(),
                folder_id: created.folder_id.clone(),
                arn: created.arn.clone(),
            });

            for kind in ContentKind::ALL {
                for content in node.contents(kind) {
                    self.service
                        .create_folder_membership(
                            self.account,
                            &created.folder_id,
                            &content.member_id,
                            kind,
                        )
                        .await?;
                    report.memberships_created += 1;
                    self.progress.report(ProgressUpdate::MembershipCreated {
                        folder_id: created.folder_id.clone(),
                        member_id: content.member_id.clone(),
                        kind,
                    });
                }
            }

            worklist.extend(
                node.subfolders
                    .iter()
                    .rev()
                    .map(|child| (child, created.arn.clone())),
            );
        }

        Ok(())
    }
}
