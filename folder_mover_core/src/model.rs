//! Folder tree data model
//!
//! Field names serialize in the document layout (`Arn`, `FolderId`, `Name`,
//! `Analyses`, `Dashboards`, `Datasets`, `Subfolders`).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Folder as listed by the service, without content or children
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderSummary {
    pub arn: String,
    pub folder_id: String,
    pub name: String,
}

impl FolderSummary {
    pub fn new(arn: impl Into<String>, folder_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            folder_id: folder_id.into(),
            name: name.into(),
        }
    }
}

/// Reference to a content item attached to a folder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContentRef {
    pub member_id: String,
}

impl ContentRef {
    pub fn new(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
        }
    }
}

/// Membership entry as returned by the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderMember {
    pub member_arn: String,
    pub member_id: String,
}

impl FolderMember {
    pub fn new(member_arn: impl Into<String>, member_id: impl Into<String>) -> Self {
        Self {
            member_arn: member_arn.into(),
            member_id: member_id.into(),
        }
    }

    /// Category of this member, if it is one of the replicated kinds
    pub fn kind(&self) -> Option<ContentKind> {
        ContentKind::from_member_arn(&self.member_arn)
    }
}

/// Identifiers assigned to a freshly created folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreatedFolder {
    pub arn: String,
    pub folder_id: String,
}

/// Content category; serializes as the service's member type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContentKind {
    Analysis,
    Dashboard,
    Dataset,
}

impl ContentKind {
    /// All kinds, in replication order
    pub const ALL: [ContentKind; 3] = [Self::Analysis, Self::Dashboard, Self::Dataset];

    /// Resource-type marker carried in member ARNs
    pub fn marker(self) -> &'static str {
        match self {
            Self::Analysis => "analysis",
            Self::Dashboard => "dashboard",
            Self::Dataset => "dataset",
        }
    }

    /// Member type name used when creating memberships
    pub fn member_type(self) -> &'static str {
        match self {
            Self::Analysis => "ANALYSIS",
            Self::Dashboard => "DASHBOARD",
            Self::Dataset => "DATASET",
        }
    }

    /// Classify a member by its ARN.
    ///
    /// `arn:partition:service:region:account:<type>/<id>` is classified by the
    /// `<type>` segment alone. Anything else falls back to the first marker
    /// found as a substring, in [`ContentKind::ALL`] order.
    pub fn from_member_arn(arn: &str) -> Option<Self> {
        let mut parts = arn.splitn(6, ':');
        if parts.next() == Some("arn")
            && let Some(resource) = parts.nth(4)
        {
            let resource_type = resource.split('/').next().unwrap_or(resource);
            return Self::ALL
                .into_iter()
                .find(|kind| kind.marker() == resource_type);
        }

        Self::ALL
            .into_iter()
            .find(|kind| arn.contains(kind.marker()))
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.member_type())
    }
}

/// Content of one folder, partitioned by kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderContents {
    pub analyses: Vec<ContentRef>,
    pub dashboards: Vec<ContentRef>,
    pub datasets: Vec<ContentRef>,
}

impl FolderContents {
    /// Partition raw memberships; members of other types are dropped
    pub fn from_members(members: Vec<FolderMember>) -> Self {
        let mut contents = Self::default();
        for member in members {
            match member.kind() {
                Some(kind) => contents.push(kind, ContentRef::new(member.member_id)),
                None => log::debug!(
                    "Skipping member {} with unsupported type",
                    member.member_arn
                ),
            }
        }
        contents
    }

    pub fn push(&mut self, kind: ContentKind, content: ContentRef) {
        match kind {
            ContentKind::Analysis => self.analyses.push(content),
            ContentKind::Dashboard => self.dashboards.push(content),
            ContentKind::Dataset => self.datasets.push(content),
        }
    }

    pub fn len(&self) -> usize {
        self.analyses.len() + self.dashboards.len() + self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One folder with its content and exclusively owned subfolders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FolderNode {
    pub arn: String,
    pub folder_id: String,
    pub name: String,
    #[serde(default)]
    pub analyses: Vec<ContentRef>,
    #[serde(default)]
    pub dashboards: Vec<ContentRef>,
    #[serde(default)]
    pub datasets: Vec<ContentRef>,
    #[serde(default)]
    pub subfolders: Vec<FolderNode>,
}

impl FolderNode {
    /// Empty node for a listed folder
    pub fn new(summary: FolderSummary) -> Self {
        Self::with_contents(summary, FolderContents::default())
    }

    pub fn with_contents(summary: FolderSummary, contents: FolderContents) -> Self {
        Self {
            arn: summary.arn,
            folder_id: summary.folder_id,
            name: summary.name,
            analyses: contents.analyses,
            dashboards: contents.dashboards,
            datasets: contents.datasets,
            subfolders: Vec::new(),
        }
    }

    pub fn summary(&self) -> FolderSummary {
        FolderSummary::new(&self.arn, &self.folder_id, &self.name)
    }

    /// Content of the given kind
    pub fn contents(&self, kind: ContentKind) -> &[ContentRef] {
        match kind {
            ContentKind::Analysis => &self.analyses,
            ContentKind::Dashboard => &self.dashboards,
            ContentKind::Dataset => &self.datasets,
        }
    }

    /// Number of content references held directly by this folder
    pub fn member_count(&self) -> usize {
        self.analyses.len() + self.dashboards.len() + self.datasets.len()
    }

    /// Pre-order walk over this node and all descendants
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![(0, self)],
        }
    }

    /// Number of folders in this tree, this node included
    pub fn folder_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of content references in this tree
    pub fn total_member_count(&self) -> usize {
        self.iter().map(|(_, node)| node.member_count()).sum()
    }

    /// Ids of every folder below this node (excluding the node itself)
    pub fn descendant_ids(&self) -> HashSet<&str> {
        self.iter()
            .skip(1)
            .map(|(_, node)| node.folder_id.as_str())
            .collect()
    }
}

/// Pre-order iterator yielding `(depth, node)`; the root has depth 0
pub struct PreOrder<'a> {
    stack: Vec<(usize, &'a FolderNode)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (usize, &'a FolderNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.subfolders.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, children: Vec<FolderNode>) -> FolderNode {
        let mut node = FolderNode::new(FolderSummary::new(format!("arn:{id}"), id, id));
        node.subfolders = children;
        node
    }

    #[test]
    fn test_classifies_by_resource_type_segment() {
        let arn = "arn:aws:quicksight:us-east-1:111122223333:analysis/weekly-dataset-review";
        assert_eq!(ContentKind::from_member_arn(arn), Some(ContentKind::Analysis));

        let arn = "arn:aws:quicksight:us-east-1:111122223333:dataset/analysis-input";
        assert_eq!(ContentKind::from_member_arn(arn), Some(ContentKind::Dataset));

        let arn = "arn:aws:quicksight:us-east-1:111122223333:dashboard/d-1";
        assert_eq!(ContentKind::from_member_arn(arn), Some(ContentKind::Dashboard));
    }

    #[test]
    fn test_unknown_resource_type_is_not_classified() {
        let arn = "arn:aws:quicksight:us-east-1:111122223333:topic/dataset-topic";
        assert_eq!(ContentKind::from_member_arn(arn), None);
    }

    #[test]
    fn test_substring_fallback_for_non_arn_refs() {
        assert_eq!(
            ContentKind::from_member_arn("legacy/dashboard/abc"),
            Some(ContentKind::Dashboard)
        );
        assert_eq!(ContentKind::from_member_arn("something-else"), None);
    }

    #[test]
    fn test_member_type_names() {
        let names: Vec<_> = ContentKind::ALL.iter().map(|k| k.member_type()).collect();
        assert_eq!(names, ["ANALYSIS", "DASHBOARD", "DATASET"]);
        assert_eq!(
            serde_json::to_string(&ContentKind::Dashboard).unwrap(),
            "\"DASHBOARD\""
        );
    }

    #[test]
    fn test_contents_partition_members() {
        let members = vec![
            FolderMember::new("arn:aws:quicksight:r:1:analysis/a1", "a1"),
            FolderMember::new("arn:aws:quicksight:r:1:dataset/s1", "s1"),
            FolderMember::new("arn:aws:quicksight:r:1:dashboard/d1", "d1"),
            FolderMember::new("arn:aws:quicksight:r:1:theme/t1", "t1"),
            FolderMember::new("arn:aws:quicksight:r:1:analysis/a2", "a2"),
        ];

        let contents = FolderContents::from_members(members);

        assert_eq!(contents.analyses, vec![ContentRef::new("a1"), ContentRef::new("a2")]);
        assert_eq!(contents.dashboards, vec![ContentRef::new("d1")]);
        assert_eq!(contents.datasets, vec![ContentRef::new("s1")]);
        assert_eq!(contents.len(), 4);
    }

    #[test]
    fn test_pre_order_walk_with_depth() {
        let tree = node(
            "F1",
            vec![node("F2", vec![node("F4", vec![])]), node("F3", vec![])],
        );

        let visited: Vec<_> = tree
            .iter()
            .map(|(depth, n)| (depth, n.folder_id.as_str()))
            .collect();

        assert_eq!(visited, vec![(0, "F1"), (1, "F2"), (2, "F4"), (1, "F3")]);
        assert_eq!(tree.folder_count(), 4);
        assert_eq!(
            tree.descendant_ids(),
            HashSet::from(["F2", "F3", "F4"])
        );
    }

    #[test]
    fn test_serializes_empty_arrays() {
        let leaf = node("F9", vec![]);
        let json = serde_json::to_value(&leaf).unwrap();

        assert_eq!(json["Arn"], "arn:F9");
        assert_eq!(json["FolderId"], "F9");
        assert_eq!(json["Name"], "F9");
        for key in ["Analyses", "Dashboards", "Datasets", "Subfolders"] {
            assert_eq!(json[key], serde_json::json!([]), "{key} must be present");
        }
    }

    #[test]
    fn test_deserializes_missing_arrays_as_empty() {
        let json = r#"{"Arn":"arn:x","FolderId":"x","Name":"X","Analyses":[{"MemberId":"a"}]}"#;
        let node: FolderNode = serde_json::from_str(json).unwrap();

        assert_eq!(node.analyses, vec![ContentRef::new("a")]);
        assert!(node.dashboards.is_empty());
        assert!(node.subfolders.is_empty());
    }
}
