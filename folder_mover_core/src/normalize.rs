//! Root selection for discovered trees
//!
//! The folder listing returns nested folders alongside true roots, so after
//! every listed folder has been expanded the same subtree can appear both on
//! its own and inside its ancestor. Normalization keeps only the nodes that
//! are not a descendant of any other node in the list.

use crate::model::FolderNode;
use log::{debug, warn};
use std::collections::HashSet;

/// Drops folders already represented as a descendant of another folder
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeNormalizer;

impl TreeNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Keep only true roots.
    ///
    /// A node is dropped when its id occurs anywhere below another node in
    /// `folders`. If the same root id occurs more than once, the first
    /// occurrence is kept. The result is a fixed point: normalizing it again
    /// changes nothing.
    pub fn normalize(&self, folders: Vec<FolderNode>) -> Vec<FolderNode> {
        let nested: HashSet<String> = folders
            .iter()
            .flat_map(|folder| folder.descendant_ids())
            .map(str::to_string)
            .collect();

        let mut kept_ids = HashSet::new();
        let before = folders.len();
        let roots: Vec<FolderNode> = folders
            .into_iter()
            .filter(|folder| {
                if nested.contains(&folder.folder_id) {
                    debug!("Dropping {}: nested under another folder", folder.folder_id);
                    return false;
                }
                if !kept_ids.insert(folder.folder_id.clone()) {
                    warn!("Folder {} listed more than once; keeping the first", folder.folder_id);
                    return false;
                }
                true
            })
            .collect();

        debug!("Normalized {before} folder(s) into {} root(s)", roots.len());
        roots
    }
}
