//! Plan, report and filter summaries for terminal output

use colored::*;
use folder_mover_core::{FilterReport, ReplicationPlan, ReplicationReport};

pub fn format_plan(plan: &ReplicationPlan, destination: &str, use_color: bool) -> String {
    let mut output = String::new();
    let heading = format!(
        "Replication plan: {} folder(s), {} membership(s) under {destination}",
        plan.folders.len(),
        plan.membership_count
    );
    output.push_str(&paint(&heading, use_color, |s| s.bold()));
    output.push('\n');

    for folder in &plan.folders {
        output.push_str(&format!(
            "  {}{} -> {} ({} item(s))\n",
            "  ".repeat(folder.depth),
            folder.name,
            paint(&folder.folder_id, use_color, |s| s.cyan()),
            folder.member_count
        ));
    }

    for id in &plan.collisions {
        output.push_str(&paint(
            &format!("  ! {id} would be created more than once"),
            use_color,
            |s| s.red(),
        ));
        output.push('\n');
    }
    output
}

pub fn format_report(report: &ReplicationReport, use_color: bool) -> String {
    let mut output = String::new();
    for folder in &report.folders {
        output.push_str(&format!(
            "  {} {} -> {}\n",
            paint("✓", use_color, |s| s.green()),
            folder.source_folder_id,
            folder.arn
        ));
    }
    output.push_str(&format!(
        "{} folder(s) created, {} membership(s) created\n",
        report.folders.len(),
        report.memberships_created
    ));
    output
}

pub fn format_filter_report(report: &FilterReport, use_color: bool) -> String {
    let mut output = format!(
        "Kept {} root folder(s), excluded {}\n",
        report.kept.len(),
        report.excluded.len()
    );
    for id in &report.unmatched {
        output.push_str(&paint(
            &format!("  ! excluded id {id} matched no top-level folder"),
            use_color,
            |s| s.yellow(),
        ));
        output.push('\n');
    }
    output
}

fn paint(text: &str, use_color: bool, color: fn(&str) -> ColoredString) -> String {
    if use_color {
        color(text).to_string()
    } else {
        text.to_string()
    }
}
