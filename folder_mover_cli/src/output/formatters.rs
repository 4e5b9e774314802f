use super::OutputFormatter;
use anyhow::Result;
use colored::*;
use folder_mover_core::{ContentKind, FolderNode, document};

/// The folder document exactly as `discover --output` writes it
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_folders(&self, folders: &[FolderNode]) -> Result<String> {
        Ok(document::to_json_string(folders)?)
    }
}

/// Human-readable tree with content counts per folder
pub struct TreeFormatter {
    use_color: bool,
}

impl TreeFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn folder_line(&self, node: &FolderNode) -> String {
        let counts: Vec<String> = ContentKind::ALL
            .iter()
            .map(|&kind| format!("{} {}", node.contents(kind).len(), plural(kind)))
            .collect();
        format!(
            "{} ({}) {}",
            self.colorize(&node.name, |s| s.bold()),
            self.colorize(&node.folder_id, |s| s.cyan()),
            self.colorize(&format!("[{}]", counts.join(", ")), |s| s.dimmed()),
        )
    }
}

fn plural(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Analysis => "analyses",
        ContentKind::Dashboard => "dashboards",
        ContentKind::Dataset => "datasets",
    }
}

impl OutputFormatter for TreeFormatter {
    fn format_folders(&self, folders: &[FolderNode]) -> Result<String> {
        let mut output = String::new();

        // (node, indentation for its children, connector for its own line)
        let mut stack: Vec<(&FolderNode, String, &str)> = folders
            .iter()
            .rev()
            .map(|root| (root, String::new(), ""))
            .collect();

        while let Some((node, indent, connector)) = stack.pop() {
            output.push_str(&indent);
            output.push_str(connector);
            output.push_str(&self.folder_line(node));
            output.push('\n');

            let child_indent = match connector {
                "" => indent,
                "└── " => format!("{indent}    "),
                _ => format!("{indent}│   "),
            };
            let last = node.subfolders.len().saturating_sub(1);
            for (i, child) in node.subfolders.iter().enumerate().rev() {
                let connector = if i == last { "└── " } else { "├── " };
                stack.push((child, child_indent.clone(), connector));
            }
        }

        let folder_count: usize = folders.iter().map(FolderNode::folder_count).sum();
        let member_count: usize = folders.iter().map(FolderNode::total_member_count).sum();
        output.push_str(&format!(
            "\n{} root folder(s), {folder_count} folder(s), {member_count} content item(s)\n",
            folders.len()
        ));
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folder_mover_core::{ContentRef, FolderSummary};

    fn node(id: &str, name: &str) -> FolderNode {
        FolderNode::new(FolderSummary::new(format!("arn:{id}"), id, name))
    }

    #[test]
    fn test_tree_layout() {
        let mut root = node("F1", "Sales");
        root.dashboards.push(ContentRef::new("d1"));
        let mut eu = node("F2", "EU");
        eu.subfolders.push(node("F4", "Draft"));
        root.subfolders.push(eu);
        root.subfolders.push(node("F3", "US"));

        let output = TreeFormatter::new(false).format_folders(&[root]).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Sales (F1) [0 analyses, 1 dashboards, 0 datasets]");
        assert_eq!(lines[1], "├── EU (F2) [0 analyses, 0 dashboards, 0 datasets]");
        assert_eq!(lines[2], "│   └── Draft (F4) [0 analyses, 0 dashboards, 0 datasets]");
        assert_eq!(lines[3], "└── US (F3) [0 analyses, 0 dashboards, 0 datasets]");
        assert_eq!(lines[5], "1 root folder(s), 4 folder(s), 1 content item(s)");
    }

    #[test]
    fn test_json_matches_document() {
        let folders = vec![node("F1", "Sales")];
        let json = JsonFormatter.format_folders(&folders).unwrap();
        assert_eq!(json, document::to_json_string(&folders).unwrap());
    }
}
