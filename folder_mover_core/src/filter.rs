//! Exclusion of top-level folders before replication

use crate::model::FolderNode;
use log::{info, warn};
use std::collections::HashSet;

/// Removes top-level folders by id; their subtrees go with them
#[derive(Debug, Clone, Default)]
pub struct FolderFilter {
    excluded: HashSet<String>,
}

/// Outcome of [`FolderFilter::apply_with_report`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReport {
    pub kept: Vec<FolderNode>,
    /// Ids that were removed, in input order
    pub excluded: Vec<String>,
    /// Excluded ids that matched no top-level folder, sorted
    pub unmatched: Vec<String>,
}

impl FolderFilter {
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: excluded.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, folder_id: &str) -> bool {
        self.excluded.contains(folder_id)
    }

    /// Top-level set difference; descendants are never inspected
    pub fn apply(&self, folders: Vec<FolderNode>) -> Vec<FolderNode> {
        self.apply_with_report(folders).kept
    }

    /// Like [`apply`](Self::apply), also reporting which exclusions matched
    pub fn apply_with_report(&self, folders: Vec<FolderNode>) -> FilterReport {
        let mut excluded = Vec::new();
        let mut kept = Vec::with_capacity(folders.len());

        for folder in folders {
            if self.is_excluded(&folder.folder_id) {
                info!(
                    "Excluding folder {} ({}) and {} subfolder(s)",
                    folder.folder_id,
                    folder.name,
                    folder.folder_count() - 1
                );
                excluded.push(folder.folder_id);
            } else {
                kept.push(folder);
            }
        }

        let mut unmatched: Vec<String> = self
            .excluded
            .iter()
            .filter(|id| !excluded.contains(id))
            .cloned()
            .collect();
        unmatched.sort();
        for id in &unmatched {
            warn!("Excluded folder id {id} matched no top-level folder");
        }

        FilterReport {
            kept,
            excluded,
            unmatched,
        }
    }
}
