//! Filter command orchestrator

use crate::output::format_filter_report;
use anyhow::{Context, Result};
use folder_mover_core::{FilterReport, FolderFilter, FolderNode, document};
use std::path::Path;

/// Exclude top-level folders from `folders`, printing what happened to stderr
pub fn exclude_folders(
    folders: Vec<FolderNode>,
    excluded_ids: &[String],
    use_color: bool,
) -> FilterReport {
    let report = FolderFilter::new(excluded_ids.iter().cloned()).apply_with_report(folders);
    if !excluded_ids.is_empty() {
        eprint!("{}", format_filter_report(&report, use_color));
    }
    report
}

/// Read a document, exclude folders, and write the result
///
/// Writes to stdout when `output` is `None`.
pub async fn filter_document(
    input: &Path,
    output: Option<&Path>,
    excluded_ids: &[String],
    use_color: bool,
) -> Result<FilterReport> {
    let folders = document::read_document(input)
        .await
        .with_context(|| format!("Failed to read document {}", input.display()))?;

    let report = exclude_folders(folders, excluded_ids, use_color);

    match output {
        Some(path) => document::write_document(path, &report.kept)
            .await
            .with_context(|| format!("Failed to write document {}", path.display()))?,
        None => print!("{}", document::to_json_string(&report.kept)?),
    }
    Ok(report)
}
