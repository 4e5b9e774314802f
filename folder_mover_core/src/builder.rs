//! Recursive folder tree discovery
//!
//! Trees are expanded depth-first with an explicit worklist, so nesting depth
//! only costs heap, never call stack. Remote calls are issued in the same
//! order a recursive walk would issue them: for each folder, its children are
//! listed, then its content, then each child is expanded in listing order.

use crate::catalog::FolderCatalog;
use crate::error::{InternalError, Result, ValidationError};
use crate::model::{FolderNode, FolderSummary};
use crate::progress::{NullProvider, ProgressProvider, ProgressUpdate};
use log::{debug, info};

/// Builds fully populated [`FolderNode`] trees from folder summaries
pub struct TreeBuilder<'a> {
    catalog: &'a FolderCatalog<'a>,
    progress: &'a dyn ProgressProvider,
}

/// Folder waiting to be expanded
struct Pending {
    summary: FolderSummary,
    children: Option<Vec<FolderSummary>>,
    parent: Option<usize>,
    depth: usize,
}

/// Expanded folder, linked to its parent by arena index
struct Slot {
    node: Option<FolderNode>,
    parent: Option<usize>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(catalog: &'a FolderCatalog<'a>) -> Self {
        Self {
            catalog,
            progress: &NullProvider,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressProvider) -> Self {
        self.progress = progress;
        self
    }

    /// Build every listed folder into a full tree, in input order
    pub async fn build_all(&self, folders: Vec<FolderSummary>) -> Result<Vec<FolderNode>> {
        let mut trees = Vec::with_capacity(folders.len());
        for folder in folders {
            trees.push(self.build(folder).await?);
        }
        Ok(trees)
    }

    /// Build the tree rooted at `root`, listing its children first
    pub async fn build(&self, root: FolderSummary) -> Result<FolderNode> {
        let children = self.catalog.list_child_folders(&root.arn).await?;
        self.build_with_children(root, children).await
    }

    /// Build the tree rooted at `root` whose direct children are already known
    pub async fn build_with_children(
        &self,
        root: FolderSummary,
        children: Vec<FolderSummary>,
    ) -> Result<FolderNode> {
        let root_id = root.folder_id.clone();
        let mut arena: Vec<Slot> = Vec::new();
        let mut worklist = vec![Pending {
            summary: root,
            children: Some(children),
            parent: None,
            depth: 0,
        }];

        while let Some(pending) = worklist.pop() {
            if let Some(parent) = pending.parent {
                ensure_not_ancestor(&arena, parent, &pending.summary.arn)?;
            }

            let children = match pending.children {
                Some(children) => children,
                None => {
                    self.catalog
                        .list_child_folders(&pending.summary.arn)
                        .await?
                }
            };
            let contents = self
                .catalog
                .list_folder_contents(&pending.summary.folder_id)
                .await?;

            self.progress.report(ProgressUpdate::FolderDiscovered {
                folder_id: pending.summary.folder_id.clone(),
                name: pending.summary.name.clone(),
                depth: pending.depth,
            });

            let index = arena.len();
            arena.push(Slot {
                node: Some(FolderNode::with_contents(pending.summary, contents)),
                parent: pending.parent,
            });

            worklist.extend(children.into_iter().rev().map(|child| Pending {
                summary: child,
                children: None,
                parent: Some(index),
                depth: pending.depth + 1,
            }));
        }

        let root = assemble(arena)?;
        info!(
            "Discovered folder {root_id}: {} folder(s), {} member(s)",
            root.folder_count(),
            root.total_member_count()
        );
        Ok(root)
    }
}

/// Fail if `arn` is already on the chain from `parent` up to the root
fn ensure_not_ancestor(arena: &[Slot], parent: usize, arn: &str) -> Result<()> {
    let mut cursor = Some(parent);
    while let Some(index) = cursor {
        let slot = &arena[index];
        if slot.node.as_ref().is_some_and(|node| node.arn == arn) {
            return Err(ValidationError::cycle_detected(arn).into());
        }
        cursor = slot.parent;
    }
    Ok(())
}

/// Fold the pre-order arena back into an owned tree.
///
/// Walking backwards, every node's descendants have already been moved into
/// it, so it can be moved into its parent. Siblings arrive reversed.
fn assemble(mut arena: Vec<Slot>) -> Result<FolderNode> {
    for index in (1..arena.len()).rev() {
        let slot = &mut arena[index];
        let parent = slot
            .parent
            .ok_or_else(|| InternalError::assertion(format!("slot {index} has no parent")))?;
        let mut node = slot
            .node
            .take()
            .ok_or_else(|| InternalError::assertion(format!("slot {index} already moved")))?;
        node.subfolders.reverse();

        debug!("Attaching {} under slot {parent}", node.folder_id);
        arena[parent]
            .node
            .as_mut()
            .ok_or_else(|| InternalError::assertion(format!("parent slot {parent} already moved")))?
            .subfolders
            .push(node);
    }

    let mut root = arena
        .first_mut()
        .and_then(|slot| slot.node.take())
        .ok_or_else(|| InternalError::assertion("empty discovery arena"))?;
    root.subfolders.reverse();
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{AccountSnapshot, InMemoryFolderService};
    use crate::model::ContentKind;
    use crate::service::AccountId;

    const REGION: &str = "eu-west-1";

    fn account() -> AccountId {
        AccountId::new("111122223333").unwrap()
    }

    fn service_with(folders: &[(&str, Option<&str>)]) -> InMemoryFolderService {
        let mut snapshot = AccountSnapshot::new(account(), REGION);
        for (id, parent) in folders {
            let parent_arn = parent.map(|p| snapshot.folder_arn(p));
            snapshot.add_folder(id, &format!("Folder {id}"), parent_arn.as_deref());
        }
        InMemoryFolderService::new(snapshot)
    }

    #[tokio::test]
    async fn test_builds_nested_tree_in_listing_order() {
        let service = service_with(&[
            ("root", None),
            ("a", Some("root")),
            ("b", Some("root")),
            ("a1", Some("a")),
        ]);
        let account = account();
        let catalog = FolderCatalog::new(&service, &account);
        let builder = TreeBuilder::new(&catalog);

        let root_summary = service.summary_of("root").await.unwrap();
        let tree = builder.build(root_summary).await.unwrap();

        let ids: Vec<_> = tree.iter().map(|(_, n)| n.folder_id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "a1", "b"]);
        assert_eq!(tree.subfolders.len(), 2);
        assert!(tree.subfolders[1].subfolders.is_empty());
    }

    #[tokio::test]
    async fn test_attaches_content_by_kind() {
        let service = service_with(&[("root", None)]);
        service
            .seed_member("root", ContentKind::Dashboard, "dash-1")
            .await
            .unwrap();
        service
            .seed_member("root", ContentKind::Dataset, "ds-1")
            .await
            .unwrap();
        let account = account();
        let catalog = FolderCatalog::new(&service, &account);

        let root_summary = service.summary_of("root").await.unwrap();
        let tree = TreeBuilder::new(&catalog).build(root_summary).await.unwrap();

        assert!(tree.analyses.is_empty());
        assert_eq!(tree.dashboards[0].member_id, "dash-1");
        assert_eq!(tree.datasets[0].member_id, "ds-1");
    }

    #[tokio::test]
    async fn test_deep_nesting_does_not_recurse() {
        let depth = 1_000;
        let mut folders: Vec<(String, Option<String>)> = vec![("d0".to_string(), None)];
        for level in 1..depth {
            folders.push((format!("d{level}"), Some(format!("d{}", level - 1))));
        }
        let borrowed: Vec<(&str, Option<&str>)> = folders
            .iter()
            .map(|(id, parent)| (id.as_str(), parent.as_deref()))
            .collect();
        let service = service_with(&borrowed);
        let account = account();
        let catalog = FolderCatalog::new(&service, &account);

        let root_summary = service.summary_of("d0").await.unwrap();
        let tree = TreeBuilder::new(&catalog).build(root_summary).await.unwrap();

        assert_eq!(tree.folder_count(), depth);
        let (deepest, node) = tree.iter().last().unwrap();
        assert_eq!(deepest, depth - 1);
        assert_eq!(node.folder_id, format!("d{}", depth - 1));
    }

    #[test]
    fn test_assemble_rejects_empty_arena() {
        assert!(assemble(Vec::new()).is_err());
    }
}
